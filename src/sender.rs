//! Outbound send path.
//!
//! Every byte the server puts on the wire, the handshake response,
//! data frames and the close acknowledgment, goes through one
//! [`FrameSender`] so writes are never interleaved.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{Error, TransportError};
use crate::frame::{Frame, OpCode};

/// Cloneable handle over the single write half of the connection.
///
/// Held by the serving loop for the handshake response and close
/// acknowledgment, and by the consumer context for replies. The
/// inner lock covers one whole frame per acquisition.
#[derive(Debug)]
pub struct FrameSender<W> {
    writer: Arc<Mutex<W>>,
}

impl<W> Clone for FrameSender<W> {
    fn clone(&self) -> Self {
        Self {
            writer: self.writer.clone(),
        }
    }
}

impl<W: Write> FrameSender<W> {
    /// Take ownership of the write half.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
        }
    }

    /// Encode a server frame and write it out as one unit.
    /// Payloads above 125 bytes fail before anything is written.
    pub fn send(&self, opcode: OpCode, payload: &[u8]) -> Result<(), Error> {
        let bytes = Frame::encode(opcode, payload)?;
        self.send_raw(&bytes)?;
        Ok(())
    }

    /// Send a close frame with an empty payload.
    pub fn send_close(&self) -> Result<(), Error> {
        self.send(OpCode::Close, &[])
    }

    /// Write pre-encoded bytes under the send lock.
    pub(crate) fn send_raw(&self, bytes: &[u8]) -> Result<(), TransportError> {
        let mut writer = self.writer.lock();
        writer
            .write_all(bytes)
            .and_then(|_| writer.flush())
            .map_err(TransportError::WriteFailed)
    }
}
