//! Client upgrade request.
//!
//! From [RFC-6455 Section 4.2](https://datatracker.ietf.org/doc/html/rfc6455#section-4.2):
//!
//! When a client starts a WebSocket connection, it sends its part of the
//! opening handshake.  The server must parse at least part of this
//! handshake in order to obtain the necessary information to generate
//! the server part of the handshake.
//!
//! Example:
//!
//! ```text
//! GET /path HTTP/1.1
//! Host: www.example.com
//! Upgrade: websocket
//! Connection: Upgrade
//! Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==
//! Sec-WebSocket-Version: 13
//! ```
//!
//! Only `Sec-WebSocket-Key` is required and extracted; all other
//! headers are ignored.

use super::MAX_ALLOW_HEADERS;
use super::{HTTP_METHOD, HEADER_SEC_WEBSOCKET_KEY_NAME};

use crate::error::HandshakeError;

/// Http request presentation.
///
/// `path` and `sec_key` borrow the read buffer; the struct lives
/// only for the duration of the handshake.
#[derive(Debug)]
pub struct UpgradeRequest<'b> {
    pub path: &'b [u8],
    pub sec_key: &'b [u8],
}

impl<'b> UpgradeRequest<'b> {
    /// Parse from a provided buffer, returns the request and the
    /// number of bytes parsed.
    ///
    /// If the buffer does not contain a complete http request, a
    /// [`HandshakeError::NotEnoughData`] error will be returned and
    /// the caller should read more. A request that is not
    /// `GET ... HTTP/1.1` fails with
    /// [`HandshakeError::MalformedRequest`]; a complete request
    /// without a `Sec-WebSocket-Key` header (case insensitive) fails
    /// with [`HandshakeError::MissingKey`].
    pub fn decode(buf: &'b [u8]) -> Result<(Self, usize), HandshakeError> {
        let mut headers = [httparse::EMPTY_HEADER; MAX_ALLOW_HEADERS];
        let mut request = httparse::Request::new(&mut headers);

        let decode_n = match request.parse(buf)? {
            httparse::Status::Complete(n) => n,
            httparse::Status::Partial => return Err(HandshakeError::NotEnoughData),
        };

        // check method
        if request.method.unwrap().as_bytes() != HTTP_METHOD {
            return Err(HandshakeError::MalformedRequest);
        }

        // check version, should be HTTP/1.1
        // ref: https://docs.rs/httparse/latest/src/httparse/lib.rs.html#581-596
        if request.version.unwrap() != 1_u8 {
            return Err(HandshakeError::MalformedRequest);
        }

        // header name is case insensitive
        // ref: https://datatracker.ietf.org/doc/html/rfc6455#section-4.1
        let sec_key = request
            .headers
            .iter()
            .find(|h| {
                h.name
                    .as_bytes()
                    .eq_ignore_ascii_case(HEADER_SEC_WEBSOCKET_KEY_NAME)
            })
            .map(|h| h.value)
            .ok_or(HandshakeError::MissingKey)?;

        let path = request.path.unwrap().as_bytes();

        Ok((UpgradeRequest { path, sec_key }, decode_n))
    }
}
