//! Tokio codec adapter for the frame format.
//!
//! [`DatagramCodec`] lets the receive loop run over
//! `tokio_util::udp::UdpFramed`: each received datagram is decoded as one
//! frame, and a decode failure surfaces as an error item on the stream
//! without tearing the stream down.

use crate::core::packet::Packet;
use crate::error::ProtocolError;
use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

/// Frames BISS packets over UDP datagrams.
#[derive(Debug, Default, Clone, Copy)]
pub struct DatagramCodec;

impl Decoder for DatagramCodec {
    type Item = Packet;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Packet>, ProtocolError> {
        if src.is_empty() {
            return Ok(None);
        }

        // One datagram is one frame. Consume it whole so a rejected
        // datagram leaves nothing behind for the next receive.
        let frame = src.split_to(src.len());
        let packet = Packet::from_bytes(&frame)?;
        Ok(Some(packet))
    }
}

impl Encoder<Packet> for DatagramCodec {
    type Error = ProtocolError;

    fn encode(&mut self, packet: Packet, dst: &mut BytesMut) -> Result<(), ProtocolError> {
        dst.extend_from_slice(&packet.to_bytes());
        Ok(())
    }
}
