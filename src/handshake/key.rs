//! Accept key derivation.
//!
//! RFC-6455 section 4.2.2: the server proves it actually read the
//! client's `Sec-WebSocket-Key` by concatenating it with a fixed
//! GUID, hashing, and sending the digest back base64-encoded.

use super::GUID;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha1::{Digest, Sha1};

/// Generate a random `Sec-WebSocket-Key`: 16 nonce bytes, base64.
///
/// The server never sends one of these; it is for clients driving
/// a handshake, which around here means test clients.
pub fn new_sec_key() -> [u8; 24] {
    let nonce: [u8; 16] = rand::random();
    let mut key = [0_u8; 24];
    // 16 nonce bytes fill exactly 24 output chars
    Engine::encode_slice(&STANDARD, nonce, &mut key).unwrap();
    key
}

/// Derive `Sec-WebSocket-Accept`: base64(SHA1(key ++ GUID)).
pub fn derive_accept_key(sec_key: &[u8]) -> [u8; 28] {
    let digest = Sha1::new()
        .chain_update(sec_key)
        .chain_update(GUID)
        .finalize();
    let mut accept = [0_u8; 28];
    // a 20-byte digest fills exactly 28 output chars
    Engine::encode_slice(&STANDARD, digest, &mut accept).unwrap();
    accept
}
