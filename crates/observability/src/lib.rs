//! Shared logging/tracing setup for the procurement services.

/// Initialize process-wide tracing and logging.
///
/// Safe to call multiple times; subsequent calls become no-ops, so tests
/// and binaries can both call it unconditionally.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filter and output format).
pub mod tracing;
