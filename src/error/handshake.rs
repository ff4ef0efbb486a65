use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum HandshakeError {
    MissingKey,

    MalformedRequest,

    // read
    NotEnoughData,

    // write
    NotEnoughCapacity,

    Httparse(httparse::Error),
}

impl Display for HandshakeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use HandshakeError::*;
        match self {
            MissingKey => write!(f, "Missing sec-websocket-key header"),

            MalformedRequest => write!(f, "Malformed upgrade request"),

            NotEnoughData => write!(f, "Not enough data to parse"),

            NotEnoughCapacity => write!(f, "Not enough space to write to"),

            Httparse(e) => write!(f, "Http parse error: {}", e),
        }
    }
}

impl From<httparse::Error> for HandshakeError {
    fn from(e: httparse::Error) -> Self { HandshakeError::Httparse(e) }
}

impl std::error::Error for HandshakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let HandshakeError::Httparse(e) = self {
            Some(e)
        } else {
            None
        }
    }
}
