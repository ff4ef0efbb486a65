//! Websocket data frame.
//!
//! [RFC-6455 Section5](https://datatracker.ietf.org/doc/html/rfc6455#section-5)
//!
//! Only the short form of the frame header is supported; payloads
//! are at most [`MAX_PAYLOAD_LEN`] bytes and the extended 16/64-bit
//! length encodings are rejected.
//!
//! ```text
//! 0                   1                   2
//! 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 ...
//! +-+-+-+-+-------+-+-------------+---------------+
//! |F|R|R|R| opcode|M| Payload len |  Masking-key  |
//! |I|S|S|S|  (4)  |A|  (7, 0-125) | (if MASK set) |
//! |N|V|V|V|       |S|             |               |
//! +-+-+-+-+-------+-+-------------+---------------+
//! |                 Payload Data                  |
//! +-----------------------------------------------+
//! ```

pub mod flag;
pub mod mask;

pub use flag::{Fin, OpCode};
pub use mask::Mask;

use crate::error::ProtocolError;

/// 125, the largest payload carried by a short-form frame.
pub const MAX_PAYLOAD_LEN: usize = 125;

/// How to treat inbound frames without a mask key.
///
/// RFC-6455 requires client frames to be masked; [`MaskPolicy::Strict`]
/// enforces this. Some embedded clients send unmasked frames and were
/// historically tolerated, which [`MaskPolicy::Lenient`] preserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaskPolicy {
    /// reject inbound frames with the mask bit clear
    #[default]
    Strict,
    /// accept inbound frames with or without a mask
    Lenient,
}

/// Websocket frame head.
///
/// All fields are read and written with explicit shift/mask
/// arithmetic; the in-memory layout of this struct never touches
/// the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHead {
    pub fin: Fin,
    pub opcode: OpCode,
    pub mask: Mask,
    pub length: u8,
}

impl FrameHead {
    /// Constructor.
    #[inline]
    pub const fn new(fin: Fin, opcode: OpCode, mask: Mask, length: u8) -> Self {
        Self {
            fin,
            opcode,
            mask,
            length,
        }
    }

    /// Encode to provided buffer, returns the count of written bytes.
    /// The caller should ensure the buffer is large enough,
    /// otherwise a [`ProtocolError::NotEnoughCapacity`] error will be
    /// returned.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, ProtocolError> {
        if self.length as usize > MAX_PAYLOAD_LEN {
            return Err(ProtocolError::PayloadTooLarge);
        }

        // fin, opcode
        let b1 = self.fin.to_bit() | self.opcode as u8;

        // mask, payload length
        let b2 = self.mask.to_flag() | self.length;

        let mut n: usize = 2;

        match self.mask {
            Mask::Key(key) => {
                if buf.len() < 6 {
                    return Err(ProtocolError::NotEnoughCapacity);
                }
                buf[0] = b1;
                buf[1] = b2;
                buf[2..6].copy_from_slice(&key);
                n += 4;
            }
            Mask::None => {
                if buf.len() < 2 {
                    return Err(ProtocolError::NotEnoughCapacity);
                }
                buf[0] = b1;
                buf[1] = b2;
            }
        }

        Ok(n)
    }

    /// Parse from provided buffer, returns [`FrameHead`] and the count
    /// of read bytes if the parse succeeds.
    /// If there is not enough data to parse, a
    /// [`ProtocolError::NotEnoughData`] error will be returned.
    pub fn decode(buf: &[u8]) -> Result<(Self, usize), ProtocolError> {
        if buf.len() < 2 {
            return Err(ProtocolError::NotEnoughData);
        }

        // fin, rsv1-3, opcode
        let b1 = buf[0];

        // mask, payload length
        let b2 = buf[1];

        // no extensions are negotiated, so the reserved bits
        // must be clear
        if b1 & 0x70 != 0 {
            return Err(ProtocolError::MalformedHeader);
        }

        let fin = Fin::from_bit(b1 & 0x80 != 0);
        let opcode = OpCode::from_nibble(b1 & 0x0f)?;

        // 126 and 127 announce extended lengths, which are
        // out of protocol here
        let length = b2 & 0x7f;
        if length as usize > MAX_PAYLOAD_LEN {
            return Err(ProtocolError::PayloadTooLarge);
        }

        let mut n: usize = 2;

        let mask = if Mask::is_set(b2) {
            if buf.len() < 6 {
                return Err(ProtocolError::NotEnoughData);
            }
            let mut key = [0_u8; 4];
            key.copy_from_slice(&buf[2..6]);
            n += 4;
            Mask::Key(key)
        } else {
            Mask::None
        };

        Ok((
            FrameHead {
                fin,
                opcode,
                mask,
                length,
            },
            n,
        ))
    }
}

/// One decoded frame: head plus owned, unmasked payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub head: FrameHead,
    pub payload: Vec<u8>,
}

impl Frame {
    /// Parse a whole client frame from the provided buffer, returns
    /// the [`Frame`] and the count of consumed bytes.
    ///
    /// The payload is copied out and unmasked with the key from the
    /// head. Under [`MaskPolicy::Strict`] an inbound frame with the
    /// mask bit clear fails with [`ProtocolError::UnmaskedClientFrame`];
    /// under [`MaskPolicy::Lenient`] it is taken as-is.
    /// If the buffer does not yet hold the complete frame, a
    /// [`ProtocolError::NotEnoughData`] error will be returned and
    /// nothing is consumed.
    pub fn decode(buf: &[u8], policy: MaskPolicy) -> Result<(Self, usize), ProtocolError> {
        let (head, offset) = FrameHead::decode(buf)?;

        if policy == MaskPolicy::Strict && head.mask == Mask::None {
            return Err(ProtocolError::UnmaskedClientFrame);
        }

        let len = head.length as usize;
        if buf.len() < offset + len {
            return Err(ProtocolError::NotEnoughData);
        }

        let mut payload = buf[offset..offset + len].to_vec();
        if let Mask::Key(key) = head.mask {
            mask::apply_mask(key, &mut payload);
        }

        Ok((Frame { head, payload }, offset + len))
    }

    /// Encode a server frame: `FIN=1`, no mask, raw payload.
    /// Payloads above [`MAX_PAYLOAD_LEN`] fail with
    /// [`ProtocolError::PayloadTooLarge`].
    pub fn encode(opcode: OpCode, payload: &[u8]) -> Result<Vec<u8>, ProtocolError> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(ProtocolError::PayloadTooLarge);
        }

        let head = FrameHead::new(Fin::Y, opcode, Mask::None, payload.len() as u8);

        let mut buf = vec![0_u8; 2 + payload.len()];
        let n = head.encode(&mut buf)?;
        buf[n..].copy_from_slice(payload);

        Ok(buf)
    }
}
