//! Tracing subscriber setup.
//!
//! Logs go to stderr so formatted replies on stdout stay clean.

use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_FILTER: &str = "warn";

/// Builds the filter: `RUST_LOG` first, then `configured`, then [`DEFAULT_FILTER`].
pub fn env_filter(configured: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        configured
            .and_then(|level| EnvFilter::try_new(level).ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
    })
}

/// Installs the global fmt subscriber. Calling it again is a no-op.
pub fn init(configured: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(configured))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
