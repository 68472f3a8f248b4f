//! Tracing/logging initialization.
//!
//! One subscriber for the whole process: JSON lines, filtered through
//! `RUST_LOG` with an `info` default. The resolver and assembler emit
//! structured fields (product, supplier, order id) that land here.

use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
