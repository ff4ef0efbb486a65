//! Fin flag and opcode.
//!
//! Both live in the first header byte: FIN is the leading bit,
//! the opcode is the low nibble. [`FrameHead`](super::FrameHead)
//! splits the byte; these types only speak their own field.

use crate::error::ProtocolError;

/// Fin flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fin {
    Y,
    N,
}

/// Frame opcode, the low nibble of the first header byte.
///
/// The six values below are the only assigned ones; everything
/// else in the nibble space is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCode {
    /// continuation frame, 0x0
    Continue = 0x0,
    /// text frame, 0x1
    Text = 0x1,
    /// binary frame, 0x2
    Binary = 0x2,

    /// connection close, 0x8
    Close = 0x8,
    /// ping, 0x9
    Ping = 0x9,
    /// pong, 0xa
    Pong = 0xa,
}

impl Fin {
    #[inline]
    pub const fn from_bit(set: bool) -> Self {
        if set {
            Fin::Y
        } else {
            Fin::N
        }
    }

    /// The leading bit, positioned for the header byte.
    #[inline]
    pub const fn to_bit(&self) -> u8 {
        match self {
            Fin::Y => 0x80,
            Fin::N => 0x00,
        }
    }
}

impl OpCode {
    /// Parse the low nibble of the first header byte.
    #[inline]
    pub const fn from_nibble(n: u8) -> Result<Self, ProtocolError> {
        use OpCode::*;
        let opcode = match n {
            0x0 => Continue,
            0x1 => Text,
            0x2 => Binary,
            0x8 => Close,
            0x9 => Ping,
            0xa => Pong,
            _ => return Err(ProtocolError::UnknownOpcode),
        };
        Ok(opcode)
    }

    /// Data frames carry application payload, control frames do not.
    #[inline]
    pub const fn is_data(&self) -> bool {
        matches!(self, OpCode::Text | OpCode::Binary)
    }
}
