//! # Core Protocol Components
//!
//! The wire format of the BISS protocol: packet values, frame
//! encoding/decoding, and the datagram codec. No I/O happens here.
//!
//! ## Components
//! - **Packet**: Immutable value carrying a message type and a random
//!   16-bit identifier
//! - **PacketBuilder**: Constructs packets with fresh random identifiers
//! - **DatagramCodec**: Tokio codec for running the frame format over
//!   `UdpFramed`
//!
//! ## Wire Format
//! ```text
//! [STX(1)] [Magic "BISS"(4)] [Version(1)] [Identifier(2, BE)] [Type(1)] [ETX(1)]
//! ```
//!
//! Every frame is exactly 10 bytes; any violation rejects the whole
//! datagram.

pub mod builder;
pub mod codec;
pub mod packet;

pub use builder::PacketBuilder;
pub use codec::DatagramCodec;
pub use packet::{MessageType, Packet};
