//! Server upgrade response.
//!
//! From [RFC-6455 Section 4.2](https://datatracker.ietf.org/doc/html/rfc6455#section-4.2):
//!
//! If the server chooses to accept the incoming connection, it MUST
//! reply with a valid HTTP response.
//!
//! Exactly one response is ever written per connection:
//!
//! ```text
//! HTTP/1.1 101 Switching Protocols
//! Upgrade: websocket
//! Connection: Upgrade
//! Sec-WebSocket-Accept: s3pPLMBiTxaQ9kYGzzhZRbK+xOo=
//! ```

use super::{HTTP_STATUS_LINE, HTTP_LINE_BREAK, HTTP_HEADER_SP};
use super::{HEADER_UPGRADE, HEADER_CONNECTION, HEADER_SEC_WEBSOCKET_ACCEPT_NAME};

use crate::error::HandshakeError;

/// Http response presentation.
#[derive(Debug)]
pub struct UpgradeResponse<'b> {
    pub sec_accept: &'b [u8],
}

impl<'b> UpgradeResponse<'b> {
    /// Encode to a provided buffer, return the number of written bytes.
    ///
    /// Caller should make sure the buffer is large enough, otherwise a
    /// [`HandshakeError::NotEnoughCapacity`] error will be returned.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, HandshakeError> {
        let mut pos: usize = 0;

        macro_rules! writex {
            ($($part: expr),+) => {
                $(
                    let part: &[u8] = $part;
                    if buf.len() - pos < part.len() {
                        return Err(HandshakeError::NotEnoughCapacity);
                    }
                    buf[pos..pos + part.len()].copy_from_slice(part);
                    pos += part.len();
                )+
            };
        }

        // HTTP/1.1 101 Switching Protocols
        writex!(HTTP_STATUS_LINE, HTTP_LINE_BREAK);

        // Upgrade: websocket
        writex!(HEADER_UPGRADE.0, HTTP_HEADER_SP, HEADER_UPGRADE.1, HTTP_LINE_BREAK);

        // Connection: Upgrade
        writex!(
            HEADER_CONNECTION.0,
            HTTP_HEADER_SP,
            HEADER_CONNECTION.1,
            HTTP_LINE_BREAK
        );

        // Sec-WebSocket-Accept: {sec_accept}
        writex!(
            HEADER_SEC_WEBSOCKET_ACCEPT_NAME,
            HTTP_HEADER_SP,
            self.sec_accept,
            HTTP_LINE_BREAK
        );

        // finish with CRLF
        writex!(HTTP_LINE_BREAK);

        Ok(pos)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const RESPONSE: &[u8] = b"\
        HTTP/1.1 101 Switching Protocols\r\n\
        Upgrade: websocket\r\n\
        Connection: Upgrade\r\n\
        Sec-WebSocket-Accept: s3pPLMBiTxaQ9kYGzzhZRbK+xOo=\r\n\r\n";

    #[test]
    fn server_response() {
        let response = UpgradeResponse {
            sec_accept: b"s3pPLMBiTxaQ9kYGzzhZRbK+xOo=",
        };

        let mut buf = vec![0_u8; 256];
        let n = response.encode(&mut buf).unwrap();

        assert_eq!(&buf[..n], RESPONSE);
    }

    #[test]
    fn not_enough_capacity() {
        let response = UpgradeResponse {
            sec_accept: b"s3pPLMBiTxaQ9kYGzzhZRbK+xOo=",
        };

        let mut buf = vec![0_u8; 32];
        assert!(matches!(
            response.encode(&mut buf),
            Err(HandshakeError::NotEnoughCapacity)
        ));
    }
}
