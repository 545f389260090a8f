//! Broadcast fan-out across local network interfaces.
//!
//! UDP broadcast does not cross interface boundaries, so a multi-homed
//! host must send on every reachable segment to reach all possible
//! listeners.

use crate::config::SenderConfig;
use crate::core::packet::Packet;
use crate::error::{ProtocolError, Result};
use crate::transport::addr;
use crate::transport::sender::Sender;
use if_addrs::Interface;
use tracing::{debug, warn};

/// Transmits a packet over every usable local network interface.
#[derive(Debug, Clone, Default)]
pub struct InterfaceSender {
    sender: Sender,
}

impl InterfaceSender {
    pub fn new() -> Self {
        Self {
            sender: Sender::new(),
        }
    }

    pub fn with_config(config: &SenderConfig) -> Self {
        Self {
            sender: Sender::with_config(config),
        }
    }

    /// Transmit `packet` on all local interfaces.
    ///
    /// Loopback entries and ineligible addresses are silently skipped;
    /// per-address send failures are logged and not counted. Returns the
    /// number of addresses on which the send succeeded.
    pub async fn send(&self, packet: Packet) -> Result<u32> {
        let interfaces = if_addrs::get_if_addrs()?;
        Ok(self.fan_out(packet, &interfaces).await)
    }

    /// Transmit `packet` on the interface named `interface_name`.
    ///
    /// Unlike [`send`](InterfaceSender::send), an explicitly requested
    /// interface that cannot be used is an error: unknown name, the
    /// loopback interface, or an interface without a single usable
    /// unicast address.
    pub async fn send_via(&self, packet: Packet, interface_name: &str) -> Result<u32> {
        let interfaces: Vec<Interface> = if_addrs::get_if_addrs()?
            .into_iter()
            .filter(|interface| interface.name == interface_name)
            .collect();

        if interfaces.is_empty() {
            return Err(ProtocolError::UnknownInterface(interface_name.to_string()));
        }
        if interfaces.iter().all(Interface::is_loopback) {
            return Err(ProtocolError::LoopbackInterface(interface_name.to_string()));
        }
        if !interfaces
            .iter()
            .any(|interface| addr::is_usable(&interface.ip()))
        {
            return Err(ProtocolError::NoUsableAddress(interface_name.to_string()));
        }

        Ok(self.fan_out(packet, &interfaces).await)
    }

    async fn fan_out(&self, packet: Packet, interfaces: &[Interface]) -> u32 {
        let mut sent = 0u32;

        for interface in interfaces {
            if interface.is_loopback() {
                continue;
            }
            let ip = interface.ip();
            if !addr::is_usable(&ip) {
                continue;
            }

            match self.sender.send(packet, ip).await {
                Ok(true) => sent += 1,
                Ok(false) => {
                    debug!(interface = %interface.name, address = %ip, "short send, not counted");
                }
                Err(e) => {
                    // A down or misconfigured interface fails here; skip it
                    // and keep broadcasting on the remaining segments.
                    warn!(interface = %interface.name, address = %ip, error = %e, "send failed");
                }
            }
        }

        sent
    }
}
