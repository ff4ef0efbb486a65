#![allow(missing_docs)]
//! Errors
//!
//! Every failure is local to one connection; none of these should
//! terminate the enclosing process.

mod protocol;
mod handshake;
mod transport;
mod queue;

pub use protocol::ProtocolError;
pub use handshake::HandshakeError;
pub use transport::TransportError;
pub use queue::QueueError;

use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum Error {
    Protocol(ProtocolError),

    Handshake(HandshakeError),

    Transport(TransportError),

    Queue(QueueError),
}

impl From<ProtocolError> for Error {
    fn from(e: ProtocolError) -> Self { Error::Protocol(e) }
}

impl From<HandshakeError> for Error {
    fn from(e: HandshakeError) -> Self { Error::Handshake(e) }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self { Error::Transport(e) }
}

impl From<QueueError> for Error {
    fn from(e: QueueError) -> Self { Error::Queue(e) }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use Error::*;
        match self {
            Protocol(e) => write!(f, "Protocol error: {}", e),
            Handshake(e) => write!(f, "Handshake error: {}", e),
            Transport(e) => write!(f, "Transport error: {}", e),
            Queue(e) => write!(f, "Queue error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use Error::*;
        match self {
            Protocol(e) => e.source(),
            Handshake(e) => e.source(),
            Transport(e) => e.source(),
            Queue(e) => e.source(),
        }
    }
}
