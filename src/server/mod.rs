//! Connection serving.
//!
//! One connection at a time: accept, upgrade, run the frame loop,
//! tear down, then go back to accept. Decoded data frames move into
//! the dispatch queue; replies come back through the connection's
//! [`FrameSender`]. A failure of any one connection never takes the
//! server down.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};

use log::{debug, info, warn};

use crate::config::ServerConfig;
use crate::error::{Error, HandshakeError, ProtocolError, QueueError, TransportError};
use crate::frame::{Frame, MaskPolicy, OpCode};
use crate::handshake::{negotiate, UpgradeResponse};
use crate::queue::Producer;
use crate::sender::FrameSender;

/// Read chunk size for the serving loop.
const READ_CHUNK: usize = 512;

/// Upper bound on a buffered upgrade request.
const MAX_REQUEST_LEN: usize = 8192;

/// Connection lifecycle.
///
/// ```text
/// AwaitingHandshake -> Serving -> Closing -> Closed
/// ```
///
/// Once `Closing` is entered no further transport reads are issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnState {
    AwaitingHandshake,
    Serving,
    Closing,
    Closed,
}

/// One accepted transport, owned for its whole lifetime.
///
/// The reader half is used exclusively by the serving loop; all
/// writes go through the shared [`FrameSender`].
#[derive(Debug)]
pub struct Connection<R, W> {
    reader: R,
    sender: FrameSender<W>,
    state: ConnState,
    mask_policy: MaskPolicy,
    // unparsed inbound bytes
    buf: Vec<u8>,
}

impl<R: Read, W: Write> Connection<R, W> {
    /// Adopt a freshly accepted transport.
    pub fn new(reader: R, writer: W, mask_policy: MaskPolicy) -> Self {
        Self {
            reader,
            sender: FrameSender::new(writer),
            state: ConnState::AwaitingHandshake,
            mask_policy,
            buf: Vec::with_capacity(READ_CHUNK),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnState { self.state }

    /// A reply path for this connection, shared with the consumer.
    pub fn sender(&self) -> FrameSender<W> { self.sender.clone() }

    /// Run the upgrade exchange: read until a complete http request
    /// parses, derive the accept key, send the 101 response.
    ///
    /// On success the connection is `Serving` and every later byte
    /// on the wire is a frame. On failure the caller must drop the
    /// connection without sending anything further.
    pub fn handshake(&mut self) -> Result<(), Error> {
        debug_assert_eq!(self.state, ConnState::AwaitingHandshake);

        let accept = loop {
            match negotiate(&self.buf) {
                Ok((accept, n)) => {
                    // keep bytes past the request for the frame loop
                    self.buf.drain(..n);
                    break accept;
                }
                Err(HandshakeError::NotEnoughData) => {
                    if self.buf.len() > MAX_REQUEST_LEN {
                        return Err(HandshakeError::MalformedRequest.into());
                    }
                    self.fill_buf()?;
                }
                Err(e) => return Err(e.into()),
            }
        };

        let mut response = [0_u8; 256];
        let n = UpgradeResponse {
            sec_accept: &accept,
        }
        .encode(&mut response)
        .map_err(Error::Handshake)?;

        self.sender.send_raw(&response[..n])?;
        self.state = ConnState::Serving;

        Ok(())
    }

    /// Run the frame loop until the connection winds down, then tear
    /// it down. Always leaves the connection `Closed`.
    ///
    /// Text and binary frames are moved into the queue in arrival
    /// order; ping, pong and continuation frames are skipped; a close
    /// frame or any protocol, transport or queue failure enters
    /// `Closing`, after which a close frame is sent best-effort.
    pub fn serve(&mut self, producer: &Producer) -> Result<(), Error> {
        debug_assert_eq!(self.state, ConnState::Serving);

        let result = self.serve_frames(producer);
        self.close();
        result
    }

    fn serve_frames(&mut self, producer: &Producer) -> Result<(), Error> {
        loop {
            // drain whatever complete frames are buffered
            loop {
                match Frame::decode(&self.buf, self.mask_policy) {
                    Ok((frame, n)) => {
                        self.buf.drain(..n);

                        let opcode = frame.head.opcode;
                        if opcode == OpCode::Close {
                            debug!("close frame received");
                            self.state = ConnState::Closing;
                            return Ok(());
                        }
                        if opcode.is_data() {
                            producer.push(frame.into()).map_err(|e| {
                                self.state = ConnState::Closing;
                                e
                            })?;
                        } else {
                            debug!("skipping {:?} frame", opcode);
                        }
                    }
                    Err(ProtocolError::NotEnoughData) => break,
                    Err(e) => {
                        warn!("protocol error: {}", e);
                        self.state = ConnState::Closing;
                        return Err(e.into());
                    }
                }
            }

            self.fill_buf().map_err(|e| {
                self.state = ConnState::Closing;
                e
            })?;
        }
    }

    /// One blocking read, appended to the staging buffer.
    fn fill_buf(&mut self) -> Result<(), Error> {
        let mut chunk = [0_u8; READ_CHUNK];
        match self.reader.read(&mut chunk) {
            Ok(0) => Err(TransportError::ConnectionClosed.into()),
            Ok(n) => {
                self.buf.extend_from_slice(&chunk[..n]);
                Ok(())
            }
            Err(e) => Err(TransportError::ReadFailed(e).into()),
        }
    }

    /// `Closing -> Closed`: best-effort close acknowledgment, then
    /// the transport is released with the connection.
    fn close(&mut self) {
        if self.state == ConnState::Closed {
            return;
        }
        self.state = ConnState::Closing;

        if let Err(e) = self.sender.send_close() {
            debug!("close ack not delivered: {}", e);
        }

        self.state = ConnState::Closed;
    }
}

/// Tcp accept loop around [`Connection`].
#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    config: ServerConfig,
}

impl Server {
    /// Bind the listen socket.
    pub fn bind(config: ServerConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind(("0.0.0.0", config.port))?;
        info!("listening on {}", listener.local_addr()?);
        Ok(Self { listener, config })
    }

    /// The bound address, useful when the port was 0.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept and fully serve a single connection.
    ///
    /// `on_upgrade` runs right after the 101 response is flushed,
    /// handing over a [`FrameSender`] for this connection so the
    /// consumer context can reply. The connection is consumed and
    /// torn down before this function returns, so at most one
    /// connection is ever serving.
    pub fn serve_once<F>(&self, producer: &Producer, on_upgrade: F) -> Result<(), Error>
    where
        F: FnOnce(FrameSender<TcpStream>),
    {
        let (stream, peer) = self
            .listener
            .accept()
            .map_err(TransportError::AcceptFailed)?;
        debug!("accepted {}", peer);

        let writer = stream.try_clone().map_err(TransportError::AcceptFailed)?;
        let mut conn = Connection::new(stream, writer, self.config.mask_policy);

        conn.handshake()?;
        info!("{} upgraded", peer);

        on_upgrade(conn.sender());

        let result = conn.serve(producer);
        info!("{} closed", peer);

        // conn dropped here: the transport is fully released
        // before the next accept
        result
    }

    /// Serve connections forever, one at a time.
    ///
    /// Per-connection failures are logged and confined; the loop
    /// then accepts the next connection. Returns once the consumer
    /// side of the queue is gone.
    pub fn run<F>(&self, producer: Producer, mut on_upgrade: F)
    where
        F: FnMut(FrameSender<TcpStream>),
    {
        loop {
            match self.serve_once(&producer, &mut on_upgrade) {
                Ok(()) => {}
                Err(Error::Queue(QueueError::Closed)) => {
                    info!("consumer gone, shutting down");
                    return;
                }
                Err(e) => warn!("connection failed: {}", e),
            }
        }
    }
}
