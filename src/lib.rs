//! Minimal single-connection websocket server core.
//!
//! Implements the server side of RFC-6455 restricted to what a small
//! embedded endpoint needs: the HTTP upgrade handshake, unfragmented
//! frames with payloads of at most 125 bytes, and text/binary/close
//! opcodes. One connection is served at a time; decoded frames are
//! handed to a consumer through a bounded queue, and replies go back
//! through a [`FrameSender`](sender::FrameSender) sharing the same
//! serialized send path.
//!
//! ## High-level API
//!
//! - [`server`]
//! - [`queue`]
//! - [`sender`]
//!
//! ```ignore
//! {
//!     let (producer, consumer) = queue::bounded(10, OverflowPolicy::default());
//!     let server = Server::bind(ServerConfig::default())?;
//!
//!     // consumer context
//!     std::thread::spawn(move || {
//!         while let Ok(msg) = consumer.pop() {
//!             // react to msg.payload, reply via a FrameSender clone
//!         }
//!     });
//!
//!     // network-serving context
//!     server.run(producer);
//! }
//! ```
//!
//! ## Low-level API
//!
//! - [`frame`]
//! - [`handshake`]
//!
//! Frame:
//!
//! ```ignore
//! {
//!     // decode a client frame, unmasking the payload
//!     let (frame, offset) = Frame::decode(&buf, MaskPolicy::Strict)?;
//!
//!     // encode a server frame
//!     let bytes = Frame::encode(OpCode::Text, b"hello")?;
//! }
//! ```
//!
//! Handshake:
//!
//! ```ignore
//! {
//!     // parse a client upgrade request
//!     let (request, offset) = UpgradeRequest::decode(&buf)?;
//!
//!     // derive the accept key and encode the 101 response
//!     let accept = derive_accept_key(request.sec_key);
//!     let n = UpgradeResponse { sec_accept: &accept }.encode(&mut buf)?;
//! }
//! ```

pub mod error;
pub mod frame;
pub mod handshake;
pub mod queue;
pub mod sender;
pub mod server;
pub mod config;

pub use config::ServerConfig;
pub use error::Error;
pub use frame::{Frame, MaskPolicy, OpCode};
pub use queue::{Message, OverflowPolicy};
pub use sender::FrameSender;
pub use server::{Connection, Server};
