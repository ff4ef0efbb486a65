//! Mask flag and key.

/// Payload mask with a 32-bit key.
///
/// Client-to-server frames carry a key, server-to-client
/// frames never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mask {
    Key([u8; 4]),
    None,
}

impl Mask {
    /// Read the flag which indicates whether mask is used.
    ///
    /// If mask is used, the caller should read the next 4 bytes
    /// to get the key.
    #[inline]
    pub const fn is_set(b: u8) -> bool { b & 0x80 == 0x80 }

    /// Get the flag byte.
    #[inline]
    pub const fn to_flag(&self) -> u8 {
        match self {
            Mask::Key(_) => 0x80,
            Mask::None => 0x00,
        }
    }
}

/// Generate a new random key.
#[inline]
pub fn new_rand_key() -> [u8; 4] { rand::random::<[u8; 4]>() }

/// Mask the buffer, byte by byte.
///
/// The transform is its own inverse.
#[inline]
pub fn apply_mask(key: [u8; 4], buf: &mut [u8]) {
    for (i, b) in buf.iter_mut().enumerate() {
        *b ^= key[i & 0x03];
    }
}
