//! # Error Types
//!
//! Error handling for the BISS protocol.
//!
//! This module defines all error variants that can occur during protocol
//! operations, from socket failures to malformed datagrams.
//!
//! ## Error Categories
//! - **I/O Errors**: Socket creation, binding, and datagram transfer failures
//! - **Decode Errors**: Datagrams that are not valid protocol frames
//! - **Precondition Errors**: Caller mistakes such as an unusable local
//!   address or the reserved `None` message type
//!
//! Malformed datagrams are never fatal: [`DecodeError`] is reported as a
//! value and the receive loop keeps running. All errors implement
//! `std::error::Error` for interoperability.

use std::io;
use std::net::IpAddr;
use thiserror::Error;

/// Primary error type for all protocol operations.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("unusable local address {0}: only non-loopback, non-multicast IPv4 addresses can originate a broadcast")]
    UnusableAddress(IpAddr),

    #[error("message type None is reserved and cannot be transmitted")]
    ReservedMessageType,

    #[error("unknown network interface: {0}")]
    UnknownInterface(String),

    #[error("interface {0} is the loopback interface")]
    LoopbackInterface(String),

    #[error("interface {0} has no usable unicast address")]
    NoUsableAddress(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Reason a datagram was rejected by the frame decoder.
///
/// Checks run in the order of the variants below; the first violation
/// rejects the whole datagram. There is no partial recovery.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("datagram length {0} does not match the frame length of 10 bytes")]
    Length(usize),

    #[error("start marker {0:#04x} is not STX")]
    StartMarker(u8),

    #[error("magic bytes {0:?} are not \"BISS\"")]
    Magic([u8; 4]),

    #[error("unsupported protocol version {0}")]
    Version(u8),

    #[error("end marker {0:#04x} is not ETX")]
    EndMarker(u8),

    #[error("unknown message type code {0}")]
    MessageType(u8),
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
