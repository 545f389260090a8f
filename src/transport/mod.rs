//! # Transport Components
//!
//! UDP broadcast transmission and reception for BISS packets.
//!
//! The C-shaped pieces here compose instead of inheriting: a shared
//! socket helper and a shared address predicate are consumed by
//! independent sender and receiver types, and the richer behaviors
//! ([`RepetitiveSender`], [`InterfaceSender`], [`FilteredReceiver`]) wrap
//! the base [`Sender`] and [`Receiver`] as decorators.
//!
//! ## Components
//! - **Sender**: One broadcast transmission from a given local address
//! - **InterfaceSender**: Fan-out across all usable local interfaces
//! - **RepetitiveSender**: Redundant repeat transmission over one socket
//! - **Receiver**: Bound to the fixed port, continuous receive loop,
//!   events out through a bounded channel
//! - **FilteredReceiver**: Duplicate suppression on top of Receiver

pub mod addr;
pub mod filter;
pub mod interface;
pub mod receiver;
pub mod repeat;
pub mod sender;
pub(crate) mod socket;

pub use filter::FilteredReceiver;
pub use interface::InterfaceSender;
pub use receiver::{Receiver, ReceiverEvent};
pub use repeat::RepetitiveSender;
pub use sender::Sender;
