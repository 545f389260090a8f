//! # BISS Protocol
//!
//! Best-effort event signalling over UDP broadcast.
//!
//! BISS announces discrete, infrequent events ("the bakery is there",
//! "a delivery arrived") to every listener on a local network segment.
//! There is no central server, no handshake, and no delivery guarantee:
//! redundant transmission raises the odds a datagram gets through, and
//! receivers suppress the duplicates that redundancy produces.
//!
//! ## Components
//! - [`Packet`] / [`PacketBuilder`]: the 10-byte frame and its
//!   construction with a fresh random identifier
//! - [`Sender`]: one broadcast transmission from a chosen local address
//! - [`InterfaceSender`]: fan-out across all usable local interfaces
//! - [`RepetitiveSender`]: the same packet repeated on a fixed schedule
//! - [`Receiver`] / [`FilteredReceiver`]: continuous reception with
//!   optional duplicate suppression, events out through a bounded channel
//!
//! ## Sending
//! ```no_run
//! use biss_protocol::{InterfaceSender, MessageType, PacketBuilder};
//!
//! # async fn run() -> biss_protocol::Result<()> {
//! let packet = PacketBuilder::build(MessageType::BakeryIsThere)?;
//! let reached = InterfaceSender::new().send(packet).await?;
//! println!("broadcast on {reached} addresses");
//! # Ok(())
//! # }
//! ```
//!
//! ## Receiving
//! ```no_run
//! use biss_protocol::{FilteredReceiver, ReceiverEvent};
//!
//! # async fn run() -> biss_protocol::Result<()> {
//! let (mut events, _handle) = FilteredReceiver::bind()?.start();
//! while let Some(event) = events.recv().await {
//!     match event {
//!         ReceiverEvent::Received(packet) => println!("{:?}", packet.message_type()),
//!         ReceiverEvent::Filtered(_) | ReceiverEvent::Invalid => {}
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Wire Format
//! ```text
//! [STX(1)] [Magic "BISS"(4)] [Version(1)] [Identifier(2, BE)] [Type(1)] [ETX(1)]
//! ```
//!
//! UDP port 15000 is both the destination of every broadcast and the
//! bind port of every listener; listeners enable address reuse so
//! several can coexist on one host.

#![warn(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod core;
pub mod error;
pub mod transport;
pub mod utils;

pub use crate::core::{DatagramCodec, MessageType, Packet, PacketBuilder};
pub use crate::error::{DecodeError, ProtocolError, Result};
pub use crate::transport::{
    FilteredReceiver, InterfaceSender, Receiver, ReceiverEvent, RepetitiveSender, Sender,
};
