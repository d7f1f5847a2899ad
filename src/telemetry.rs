//! Logging initialization.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize structured logging for the host process.
///
/// Honors `RUST_LOG`, falling back to the given default level. Safe to call
/// more than once: if a global subscriber is already installed (e.g. by an
/// embedding application or integration tests), the call is a no-op.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    if tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_env_filter(filter).finish(),
    )
    .is_err()
    {
        // Subscriber already set elsewhere; ignore.
    }
}
