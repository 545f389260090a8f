//! Duplicate suppression on top of [`Receiver`].

use crate::config::ListenerConfig;
use crate::error::Result;
use crate::transport::receiver::{Receiver, ReceiverEvent};
use crate::utils::history::IdentifierHistory;
use crate::utils::metrics;
use futures::StreamExt;
use std::net::SocketAddr;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tracing::debug;

/// Receives packets but checks whether each packet was already received
/// before.
///
/// Redundant transmission means every event normally arrives several
/// times. The first occurrence of an identifier is forwarded as
/// [`ReceiverEvent::Received`]; every later occurrence becomes
/// [`ReceiverEvent::Filtered`], independent of message type. First-seen
/// wins. The history is bounded: once `history_capacity` identifiers are
/// tracked, the oldest is evicted.
#[derive(Debug)]
pub struct FilteredReceiver {
    inner: Receiver,
    history_capacity: usize,
}

impl FilteredReceiver {
    /// Bind to the default protocol port.
    pub fn bind() -> Result<Self> {
        Self::bind_with(&ListenerConfig::default())
    }

    /// Bind to the port from `config`, remembering up to
    /// `config.history_capacity` identifiers.
    pub fn bind_with(config: &ListenerConfig) -> Result<Self> {
        Ok(Self {
            inner: Receiver::bind_with(config)?,
            history_capacity: config.history_capacity,
        })
    }

    /// Local address the receiver is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.inner.local_addr()
    }

    /// Start the receive loop with duplicate suppression.
    ///
    /// The returned handle belongs to the filtering task; the inner
    /// receive loop shuts down with it, since dropping the filter drops
    /// the inner event channel.
    pub fn start(self) -> (mpsc::Receiver<ReceiverEvent>, JoinHandle<()>) {
        let (inner_rx, _inner_handle) = self.inner.start();
        let history = IdentifierHistory::new(self.history_capacity);

        let (tx, rx) = mpsc::channel(1);
        let handle = tokio::spawn(filter_loop(inner_rx, tx, history));
        (rx, handle)
    }
}

async fn filter_loop(
    inner: mpsc::Receiver<ReceiverEvent>,
    events: mpsc::Sender<ReceiverEvent>,
    mut history: IdentifierHistory,
) {
    let mut stream = ReceiverStream::new(inner);

    while let Some(event) = stream.next().await {
        let event = match event {
            ReceiverEvent::Received(packet) => {
                if history.insert(packet.identifier()) {
                    ReceiverEvent::Received(packet)
                } else {
                    metrics::global().record_filtered();
                    debug!(
                        identifier = packet.identifier(),
                        message_type = ?packet.message_type(),
                        "duplicate packet filtered"
                    );
                    ReceiverEvent::Filtered(packet)
                }
            }
            other => other,
        };

        if events.send(event).await.is_err() {
            break;
        }
    }
}
