//! Bounded dispatch queue.
//!
//! Hands decoded frames from the network-serving context to the
//! consumer context. Strict FIFO: messages are popped in wire
//! arrival order, and an overflow never disturbs what is already
//! enqueued.

use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TrySendError, SendTimeoutError, RecvTimeoutError};
use log::warn;

use crate::error::QueueError;
use crate::frame::{Frame, OpCode};

/// 10
pub const DEFAULT_CAPACITY: usize = 10;

/// One queued item: opcode plus owned, unmasked payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub opcode: OpCode,
    pub payload: Vec<u8>,
}

impl Message {
    /// Payload length in bytes.
    #[inline]
    pub fn len(&self) -> usize { self.payload.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.payload.is_empty() }
}

impl From<Frame> for Message {
    fn from(frame: Frame) -> Self {
        Message {
            opcode: frame.head.opcode,
            payload: frame.payload,
        }
    }
}

/// What to do when a push meets a full queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// block the producer up to the given timeout, then fail
    /// with [`QueueError::Full`]
    Block(Duration),
    /// drop the incoming message, log, and report success
    DropNewest,
}

impl Default for OverflowPolicy {
    fn default() -> Self { OverflowPolicy::Block(Duration::from_secs(1)) }
}

/// Create a bounded queue, returns the producer/consumer pair.
pub fn bounded(capacity: usize, policy: OverflowPolicy) -> (Producer, Consumer) {
    let (tx, rx) = crossbeam_channel::bounded(capacity);
    (Producer { tx, policy }, Consumer { rx })
}

/// Producer half, held by the serving loop.
#[derive(Debug, Clone)]
pub struct Producer {
    tx: Sender<Message>,
    policy: OverflowPolicy,
}

impl Producer {
    /// Move a message into the queue, applying the overflow policy
    /// if the queue is full. Fails with [`QueueError::Closed`] once
    /// the consumer is gone.
    pub fn push(&self, msg: Message) -> Result<(), QueueError> {
        match self.policy {
            OverflowPolicy::Block(timeout) => {
                self.tx.send_timeout(msg, timeout).map_err(|e| match e {
                    SendTimeoutError::Timeout(_) => QueueError::Full,
                    SendTimeoutError::Disconnected(_) => QueueError::Closed,
                })
            }
            OverflowPolicy::DropNewest => match self.tx.try_send(msg) {
                Ok(()) => Ok(()),
                Err(TrySendError::Full(msg)) => {
                    warn!("queue full, dropping {} byte frame", msg.len());
                    Ok(())
                }
                Err(TrySendError::Disconnected(_)) => Err(QueueError::Closed),
            },
        }
    }
}

/// Consumer half, held by the application task.
#[derive(Debug, Clone)]
pub struct Consumer {
    rx: Receiver<Message>,
}

impl Consumer {
    /// Block until a message arrives. Fails with
    /// [`QueueError::Closed`] once the producer is gone and the
    /// queue has drained.
    pub fn pop(&self) -> Result<Message, QueueError> {
        self.rx.recv().map_err(|_| QueueError::Closed)
    }

    /// Non-blocking pop, `Ok(None)` when the queue is empty.
    pub fn try_pop(&self) -> Result<Option<Message>, QueueError> {
        match self.rx.try_recv() {
            Ok(msg) => Ok(Some(msg)),
            Err(crossbeam_channel::TryRecvError::Empty) => Ok(None),
            Err(crossbeam_channel::TryRecvError::Disconnected) => Err(QueueError::Closed),
        }
    }

    /// Pop with a deadline, `Ok(None)` on timeout.
    pub fn pop_timeout(&self, timeout: Duration) -> Result<Option<Message>, QueueError> {
        match self.rx.recv_timeout(timeout) {
            Ok(msg) => Ok(Some(msg)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(QueueError::Closed),
        }
    }
}
