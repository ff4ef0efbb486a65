use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum TransportError {
    AcceptFailed(std::io::Error),

    ReadFailed(std::io::Error),

    WriteFailed(std::io::Error),

    ConnectionClosed,
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use TransportError::*;
        match self {
            AcceptFailed(e) => write!(f, "Accept failed: {}", e),
            ReadFailed(e) => write!(f, "Read failed: {}", e),
            WriteFailed(e) => write!(f, "Write failed: {}", e),
            ConnectionClosed => write!(f, "Connection closed by peer"),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use TransportError::*;
        match self {
            AcceptFailed(e) | ReadFailed(e) | WriteFailed(e) => Some(e),
            ConnectionClosed => None,
        }
    }
}
