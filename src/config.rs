//! Server configuration.

use crate::frame::MaskPolicy;
use crate::queue::{OverflowPolicy, DEFAULT_CAPACITY};

/// 9998
pub const DEFAULT_PORT: u16 = 9998;

/// Tunables for [`Server`](crate::server::Server).
///
/// ```
/// use solows::ServerConfig;
///
/// let config = ServerConfig {
///     port: 9000,
///     ..ServerConfig::default()
/// };
/// assert_eq!(config.queue_capacity, 10);
/// ```
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// tcp listen port
    pub port: u16,

    /// dispatch queue capacity
    pub queue_capacity: usize,

    /// whether unmasked inbound frames are rejected
    pub mask_policy: MaskPolicy,

    /// what a push does when the dispatch queue is full
    pub overflow_policy: OverflowPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            queue_capacity: DEFAULT_CAPACITY,
            mask_policy: MaskPolicy::default(),
            overflow_policy: OverflowPolicy::default(),
        }
    }
}
