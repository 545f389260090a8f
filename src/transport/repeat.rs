//! Redundant repeat transmission.
//!
//! With no acknowledgments, repetition is the protocol's only mitigation
//! against datagram loss. Every configured attempt runs even when an
//! earlier one fails; giving up early would only lower the delivery
//! probability the repetition exists to raise.

use crate::config::{SenderConfig, DEFAULT_DELAY, DEFAULT_REPETITIONS};
use crate::core::packet::Packet;
use crate::error::Result;
use crate::transport::sender::Sender;
use crate::transport::{addr, socket};
use std::future::Future;
use std::net::IpAddr;
use std::time::Duration;
use tracing::warn;

/// Transmits a packet more than once over the network.
///
/// Performs `repetitions + 1` sends over one bound socket, pausing
/// `delay` between attempts and not after the last one. The call blocks
/// for the whole schedule (worst case roughly `repetitions * delay`);
/// run it on its own task if the caller needs to stay responsive.
#[derive(Debug, Clone)]
pub struct RepetitiveSender {
    sender: Sender,
    repetitions: u32,
    delay: Duration,
}

impl RepetitiveSender {
    /// Default schedule: nine repetitions, one second apart.
    pub fn new() -> Self {
        Self::with_schedule(DEFAULT_REPETITIONS, DEFAULT_DELAY)
    }

    /// Schedule and port from `config`.
    pub fn with_config(config: &SenderConfig) -> Self {
        Self {
            sender: Sender::with_config(config),
            repetitions: config.repetitions,
            delay: config.delay(),
        }
    }

    /// Custom repetition count and delay on the default port.
    pub fn with_schedule(repetitions: u32, delay: Duration) -> Self {
        Self {
            sender: Sender::new(),
            repetitions,
            delay,
        }
    }

    /// Number of repeated transmissions after the first one.
    pub fn repetitions(&self) -> u32 {
        self.repetitions
    }

    /// Pause between transmissions.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Total number of transmissions, one more than the repetitions.
    pub fn transmissions(&self) -> u32 {
        self.repetitions + 1
    }

    /// Repetitively transmit `packet` from the local address `local`.
    ///
    /// Returns `Ok(true)` iff every attempt sent the full frame. Attempts
    /// that fail at the socket level are logged, count as unsuccessful,
    /// and do not stop the remaining attempts.
    pub async fn send(&self, packet: Packet, local: IpAddr) -> Result<bool> {
        let local = addr::require_usable(local)?;
        let bound = socket::bind_broadcast_socket(local, self.sender.port())?;

        let all_ok = send_repeatedly(self.transmissions(), self.delay, |attempt| {
            let sender = &self.sender;
            let bound = &bound;
            async move {
                match sender.send_with(bound, packet).await {
                    Ok(complete) => complete,
                    Err(e) => {
                        warn!(attempt, error = %e, "transmission attempt failed");
                        false
                    }
                }
            }
        })
        .await;

        Ok(all_ok)
    }
}

impl Default for RepetitiveSender {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `attempt` exactly `attempts` times, sleeping `delay` between runs
/// and never after the final one. Returns whether every attempt reported
/// success.
pub(crate) async fn send_repeatedly<F, Fut>(attempts: u32, delay: Duration, mut attempt: F) -> bool
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = bool>,
{
    let mut all_ok = true;

    for n in 0..attempts {
        if !attempt(n).await {
            all_ok = false;
        }
        if n + 1 < attempts && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    all_ok
}
