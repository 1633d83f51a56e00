//! Telemetry logic.
//! Structured logging for embedding binaries.

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// Honors `RUST_LOG`, defaulting to `userstore=info`. Panics when a
/// subscriber is already installed.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("userstore=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
