//! Construction of valid packets for transmission.

use crate::core::packet::{MessageType, Packet};
use crate::error::{ProtocolError, Result};
use rand::Rng;

/// Builds valid BISS packets for sending over the network.
///
/// Every built packet carries a uniformly random 16-bit identifier so
/// receivers can tell redundant retransmissions of one event apart from a
/// new event of the same type.
#[derive(Debug, Default)]
pub struct PacketBuilder;

impl PacketBuilder {
    /// Build a packet carrying `message_type` with a fresh random
    /// identifier.
    ///
    /// `MessageType::None` is the reserved sentinel; passing it is a
    /// caller error and is rejected rather than silently substituted.
    pub fn build(message_type: MessageType) -> Result<Packet> {
        if message_type == MessageType::None {
            return Err(ProtocolError::ReservedMessageType);
        }

        let identifier = rand::rng().random::<u16>();
        Ok(Packet::new(message_type, identifier))
    }
}
