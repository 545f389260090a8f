//! Single-shot broadcast transmission.

use crate::config::SenderConfig;
use crate::core::packet::Packet;
use crate::error::Result;
use crate::transport::{addr, socket};
use crate::utils::metrics;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, SocketAddrV4};
use tokio::net::UdpSocket;
use tracing::{debug, trace};

/// Transmits a packet over the network as a UDP broadcast.
///
/// Each call to [`send`](Sender::send) binds its own socket to the given
/// local address, so a multi-homed host can direct the broadcast onto a
/// specific segment. Success means the full 10-byte frame left the
/// socket; there is no acknowledgment from any receiver.
#[derive(Debug, Clone)]
pub struct Sender {
    endpoint: SocketAddrV4,
}

impl Sender {
    /// Sender targeting the default broadcast endpoint.
    pub fn new() -> Self {
        Self::with_config(&SenderConfig::default())
    }

    /// Sender targeting the port from `config`.
    pub fn with_config(config: &SenderConfig) -> Self {
        Self {
            endpoint: SocketAddrV4::new(Ipv4Addr::BROADCAST, config.port),
        }
    }

    /// Destination port of the broadcast endpoint.
    pub(crate) fn port(&self) -> u16 {
        self.endpoint.port()
    }

    /// Transmit `packet` from the local address `local`.
    ///
    /// `local` must pass the usability check (IPv4, non-loopback,
    /// non-multicast); an unusable address is rejected with a descriptive
    /// error rather than silently skipped. Returns `Ok(true)` iff the
    /// whole frame was sent.
    pub async fn send(&self, packet: Packet, local: IpAddr) -> Result<bool> {
        let local = addr::require_usable(local)?;
        let socket = socket::bind_broadcast_socket(local, self.endpoint.port())?;
        self.send_with(&socket, packet).await
    }

    /// Transmit `packet` over an already bound broadcast socket.
    ///
    /// Used by [`RepetitiveSender`](crate::transport::RepetitiveSender)
    /// to reuse one socket across attempts.
    pub(crate) async fn send_with(&self, socket: &UdpSocket, packet: Packet) -> Result<bool> {
        let data = packet.to_bytes();
        let sent = socket.send_to(&data, SocketAddr::V4(self.endpoint)).await?;

        let complete = sent == data.len();
        metrics::global().record_send(sent as u64, complete);
        if complete {
            trace!(
                identifier = packet.identifier(),
                message_type = ?packet.message_type(),
                endpoint = %self.endpoint,
                "packet broadcast"
            );
        } else {
            debug!(
                sent,
                expected = data.len(),
                endpoint = %self.endpoint,
                "short send"
            );
        }

        Ok(complete)
    }
}

impl Default for Sender {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;
    use crate::{MessageType, PacketBuilder};

    #[tokio::test]
    async fn rejects_a_loopback_local_address() {
        let packet = PacketBuilder::build(MessageType::BakeryIsThere).expect("valid type");
        let sender = Sender::new();

        let result = sender.send(packet, IpAddr::V4(Ipv4Addr::LOCALHOST)).await;
        assert!(matches!(result, Err(ProtocolError::UnusableAddress(_))));
    }

    #[tokio::test]
    async fn rejects_a_multicast_local_address() {
        let packet = PacketBuilder::build(MessageType::DeliveryIsThere).expect("valid type");
        let sender = Sender::new();

        let result = sender
            .send(packet, IpAddr::V4(Ipv4Addr::new(239, 0, 0, 1)))
            .await;
        assert!(matches!(result, Err(ProtocolError::UnusableAddress(_))));
    }
}
