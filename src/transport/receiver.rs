//! Continuous packet reception.

use crate::config::ListenerConfig;
use crate::core::codec::DatagramCodec;
use crate::core::packet::Packet;
use crate::error::{ProtocolError, Result};
use crate::transport::socket;
use crate::utils::metrics;
use futures::StreamExt;
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::udp::UdpFramed;
use tracing::{debug, info, trace, warn};

/// What a listener observed on the wire.
///
/// Events are delivered on a Tokio worker task, not the thread that
/// started the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiverEvent {
    /// A valid packet arrived.
    Received(Packet),
    /// A valid packet arrived whose identifier was already seen; only
    /// emitted by [`FilteredReceiver`](crate::transport::FilteredReceiver).
    Filtered(Packet),
    /// A datagram arrived that is not a valid frame.
    Invalid,
}

/// Receives BISS packets from the fixed protocol port.
///
/// The receive loop keeps exactly one receive outstanding and pushes
/// each result through a single-slot channel, so a slow consumer
/// backpressures the loop instead of piling events up. The loop stops
/// when the event receiver is dropped; there is no separate stop
/// operation.
#[derive(Debug)]
pub struct Receiver {
    socket: UdpSocket,
}

impl Receiver {
    /// Bind to the default protocol port.
    ///
    /// Must be called from within a Tokio runtime. The socket enables
    /// address reuse so multiple listener processes can coexist on one
    /// host.
    pub fn bind() -> Result<Self> {
        Self::bind_with(&ListenerConfig::default())
    }

    /// Bind to the port from `config`.
    pub fn bind_with(config: &ListenerConfig) -> Result<Self> {
        let socket = socket::bind_listener_socket(config.port)?;
        Ok(Self { socket })
    }

    /// Local address the receiver is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Start the receive loop.
    ///
    /// Returns the event channel and the handle of the spawned loop
    /// task. Aborting the handle or dropping the channel tears the loop
    /// down.
    pub fn start(self) -> (mpsc::Receiver<ReceiverEvent>, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(1);
        let handle = tokio::spawn(receive_loop(self.socket, tx));
        (rx, handle)
    }
}

async fn receive_loop(socket: UdpSocket, events: mpsc::Sender<ReceiverEvent>) {
    if let Ok(local) = socket.local_addr() {
        info!(%local, "listening for packets");
    }

    let mut framed = UdpFramed::new(socket, DatagramCodec);

    loop {
        let event = match framed.next().await {
            Some(Ok((packet, peer))) => {
                metrics::global().record_decoded();
                trace!(
                    identifier = packet.identifier(),
                    message_type = ?packet.message_type(),
                    %peer,
                    "packet received"
                );
                ReceiverEvent::Received(packet)
            }
            Some(Err(ProtocolError::Decode(e))) => {
                metrics::global().record_decode_error();
                debug!(error = %e, "invalid datagram");
                ReceiverEvent::Invalid
            }
            Some(Err(e)) => {
                // Socket-level trouble; the loop itself stays up.
                warn!(error = %e, "receive failed");
                continue;
            }
            None => break,
        };

        if events.send(event).await.is_err() {
            debug!("event receiver dropped, stopping receive loop");
            break;
        }
    }
}
