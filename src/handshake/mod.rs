//! Websocket handshake.
//!
//! Server side of the one-time HTTP upgrade exchange. Only the
//! `Sec-WebSocket-Key` header matters here; everything else in the
//! request is parsed and ignored. Once the 101 response is on the
//! wire the connection speaks frames, never HTTP again.

pub mod key;
pub mod request;
pub mod response;

pub use request::UpgradeRequest;
pub use response::UpgradeResponse;
pub use key::{new_sec_key, derive_accept_key};

/// 32
pub const MAX_ALLOW_HEADERS: usize = 32;

/// 258EAFA5-E914-47DA-95CA-C5AB0DC85B11
pub const GUID: &[u8] = b"258EAFA5-E914-47DA-95CA-C5AB0DC85B11";

/// GET
pub const HTTP_METHOD: &[u8] = b"GET";

/// CRLF
pub const HTTP_LINE_BREAK: &[u8] = b"\r\n";

/// A colon + one SP is prefered
pub const HTTP_HEADER_SP: &[u8] = b": ";

/// HTTP/1.1 101 Switching Protocols
pub const HTTP_STATUS_LINE: &[u8] = b"HTTP/1.1 101 Switching Protocols";

/// Upgrade: websocket
pub const HEADER_UPGRADE: (&[u8], &[u8]) = (b"Upgrade", b"websocket");

/// Connection: Upgrade
pub const HEADER_CONNECTION: (&[u8], &[u8]) = (b"Connection", b"Upgrade");

/// Sec-WebSocket-Key
pub const HEADER_SEC_WEBSOCKET_KEY_NAME: &[u8] = b"Sec-WebSocket-Key";

/// Sec-WebSocket-Accept
pub const HEADER_SEC_WEBSOCKET_ACCEPT_NAME: &[u8] = b"Sec-WebSocket-Accept";

use crate::error::HandshakeError;

/// Parse a client upgrade request and derive the accept key in one
/// step, returns the key and the count of parsed bytes.
pub fn negotiate(buf: &[u8]) -> Result<([u8; 28], usize), HandshakeError> {
    let (request, n) = UpgradeRequest::decode(buf)?;
    Ok((derive_accept_key(request.sec_key), n))
}

#[cfg(test)]
mod test {
    use super::*;

    pub const REQUEST: &[u8] = b"\
        GET /ws HTTP/1.1\r\n\
        Host: www.example.com\r\n\
        Upgrade: websocket\r\n\
        Connection: Upgrade\r\n\
        Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==\r\n\
        Sec-WebSocket-Version: 13\r\n\r\n";

    #[test]
    fn negotiate_request() {
        let (accept, n) = negotiate(REQUEST).unwrap();
        assert_eq!(n, REQUEST.len());
        assert_eq!(&accept, b"s3pPLMBiTxaQ9kYGzzhZRbK+xOo=");
    }
}
