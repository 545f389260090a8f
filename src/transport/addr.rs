//! Eligibility of local addresses for broadcast use.
//!
//! One predicate serves both sides of the API: an explicitly supplied
//! sender address is rejected with a descriptive error, while interface
//! enumeration silently skips ineligible candidates.

use crate::error::{ProtocolError, Result};
use std::net::{IpAddr, Ipv4Addr};

/// Whether `addr` may originate a UDP broadcast.
///
/// UDP broadcast is only supported in IPv4. Loopback addresses are not
/// allowed, and neither is the reserved multicast range: multicast is
/// defined by the four most significant bits of the address being
/// `1110`, i.e. 224.0.0.0 through 239.255.255.255.
pub fn is_usable(addr: &IpAddr) -> bool {
    match addr {
        IpAddr::V4(v4) => !v4.is_loopback() && v4.octets()[0] >> 4 != 0b1110,
        IpAddr::V6(_) => false,
    }
}

/// Validate an explicitly supplied local address, yielding its IPv4 form.
pub(crate) fn require_usable(addr: IpAddr) -> Result<Ipv4Addr> {
    match addr {
        IpAddr::V4(v4) if is_usable(&addr) => Ok(v4),
        _ => Err(ProtocolError::UnusableAddress(addr)),
    }
}
