use std::fmt::{Display, Formatter};

#[derive(Debug, PartialEq, Eq)]
pub enum ProtocolError {
    UnknownOpcode,

    UnmaskedClientFrame,

    PayloadTooLarge,

    MalformedHeader,

    NotEnoughData,

    NotEnoughCapacity,
}

impl Display for ProtocolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use ProtocolError::*;
        match self {
            UnknownOpcode => write!(f, "Unknown opcode value"),
            UnmaskedClientFrame => write!(f, "Client frame without mask"),
            PayloadTooLarge => write!(f, "Payload length above 125"),
            MalformedHeader => write!(f, "Malformed frame header"),
            NotEnoughData => write!(f, "Not enough data to parse"),
            NotEnoughCapacity => write!(f, "Not enough space to write to"),
        }
    }
}

// use default impl
impl std::error::Error for ProtocolError {}
