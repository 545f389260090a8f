//! Structured logging configuration.
//!
//! Thin setup over `tracing-subscriber`. Library code only emits
//! `tracing` events; installing a subscriber is the application's
//! choice, and both initializers here are safe to call more than once.

use tracing_subscriber::EnvFilter;

/// Initialize logging from the `RUST_LOG` environment variable, falling
/// back to `info`.
pub fn init() {
    init_with_level("info");
}

/// Initialize logging with `level` as the default filter directive,
/// still honoring `RUST_LOG` when set.
pub fn init_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // try_init: keep whatever subscriber the application installed first.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
