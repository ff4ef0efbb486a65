use std::fmt::{Display, Formatter};

#[derive(Debug, PartialEq, Eq)]
pub enum QueueError {
    Full,

    Closed,
}

impl Display for QueueError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use QueueError::*;
        match self {
            Full => write!(f, "Queue is full"),
            Closed => write!(f, "Queue is closed"),
        }
    }
}

// use default impl
impl std::error::Error for QueueError {}
