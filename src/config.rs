//! # Configuration Management
//!
//! Protocol constants and runtime configuration for the BISS protocol.
//!
//! The wire-level constants in this module are fixed by the protocol and
//! shared by every sender and receiver. [`NetworkConfig`] carries the
//! tunable settings: broadcast port, redundancy schedule, duplicate-history
//! capacity, and logging.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - TOML strings via `from_toml()`
//! - Environment variables via `from_env()`
//! - Direct instantiation with defaults

use crate::error::{ProtocolError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Current supported protocol version
pub const PROTOCOL_VERSION: u8 = 0x01;

/// Magic bytes identifying a BISS frame inside a datagram
pub const MAGIC_BYTES: [u8; 4] = *b"BISS";

/// First byte of every frame (STX)
pub const START_OF_PACKET: u8 = 0x02;

/// Last byte of every frame (ETX)
pub const END_OF_PACKET: u8 = 0x03;

/// Exact length of an encoded frame in bytes
pub const FRAME_LEN: usize = 10;

/// UDP port used for both sending and receiving
pub const PORT: u16 = 15000;

/// Default number of repeated transmissions after the first one
pub const DEFAULT_REPETITIONS: u32 = 9;

/// Default pause between repeated transmissions
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// Default capacity of the duplicate-identifier history
pub const DEFAULT_HISTORY_CAPACITY: usize = 1024;

/// Main configuration structure containing all tunable settings
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct NetworkConfig {
    /// Sender-specific configuration
    #[serde(default)]
    pub sender: SenderConfig,

    /// Listener-specific configuration
    #[serde(default)]
    pub listener: ListenerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl NetworkConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| ProtocolError::Config(format!("failed to open config file: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| ProtocolError::Config(format!("failed to read config file: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| ProtocolError::Config(format!("failed to parse TOML: {e}")))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(port) = std::env::var("BISS_PROTOCOL_PORT") {
            let port = port
                .parse::<u16>()
                .map_err(|e| ProtocolError::Config(format!("invalid BISS_PROTOCOL_PORT: {e}")))?;
            config.sender.port = port;
            config.listener.port = port;
        }

        if let Ok(repetitions) = std::env::var("BISS_PROTOCOL_REPETITIONS") {
            if let Ok(val) = repetitions.parse::<u32>() {
                config.sender.repetitions = val;
            }
        }

        if let Ok(delay) = std::env::var("BISS_PROTOCOL_DELAY_SECS") {
            if let Ok(val) = delay.parse::<u64>() {
                config.sender.delay_secs = val;
            }
        }

        if let Ok(capacity) = std::env::var("BISS_PROTOCOL_HISTORY_CAPACITY") {
            if let Ok(val) = capacity.parse::<usize>() {
                config.listener.history_capacity = val;
            }
        }

        if let Ok(level) = std::env::var("BISS_PROTOCOL_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(config)
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Validate the configuration for common misconfigurations.
    ///
    /// Returns a list of validation errors. Empty list means the
    /// configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.sender.port == 0 {
            errors.push("sender.port must not be 0".to_string());
        }

        if self.listener.port == 0 {
            errors.push("listener.port must not be 0".to_string());
        }

        if self.sender.port != self.listener.port {
            errors.push(format!(
                "sender.port ({}) and listener.port ({}) differ; senders and listeners on one segment must share a port",
                self.sender.port, self.listener.port
            ));
        }

        if self.listener.history_capacity == 0 {
            errors.push("listener.history_capacity must be at least 1".to_string());
        }

        errors
    }
}

/// Settings for the transmitting side
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SenderConfig {
    /// Destination port of the broadcast endpoint
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of repeated transmissions after the first one
    #[serde(default = "default_repetitions")]
    pub repetitions: u32,

    /// Pause between repeated transmissions, in seconds
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,
}

impl SenderConfig {
    /// Pause between repeated transmissions
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            port: PORT,
            repetitions: DEFAULT_REPETITIONS,
            delay_secs: DEFAULT_DELAY.as_secs(),
        }
    }
}

/// Settings for the receiving side
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenerConfig {
    /// Port the listener binds to
    #[serde(default = "default_port")]
    pub port: u16,

    /// How many packet identifiers the duplicate filter remembers
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            port: PORT,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level directive, e.g. "info" or "biss_protocol=debug"
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_port() -> u16 {
    PORT
}

fn default_repetitions() -> u32 {
    DEFAULT_REPETITIONS
}

fn default_delay_secs() -> u64 {
    DEFAULT_DELAY.as_secs()
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

fn default_log_level() -> String {
    "info".to_string()
}
