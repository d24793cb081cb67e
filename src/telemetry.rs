//! Logging setup for binaries and tests

use tracing_subscriber::prelude::*;

/// Install a `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// `default_directive` (e.g. `"certlist=debug"`) when it is unset or invalid.
///
/// Safe to call more than once: only the first call installs a subscriber,
/// later calls return `false`.
pub fn init_tracing(default_directive: &str) -> bool {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
