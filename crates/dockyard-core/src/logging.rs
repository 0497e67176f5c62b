//! Logging setup based on `tracing-subscriber`.
//!
//! `RUST_LOG` takes precedence when set, e.g.
//! `RUST_LOG=dockyard_ui::controller=trace` to follow every pointer transition.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,dockyard_ui=debug,dockyard_core=debug";

/// Install the global fmt subscriber.
///
/// Panics if a global subscriber is already installed. Use [`try_init`] from
/// tests or embedders that may have set one up themselves.
pub fn init() {
    tracing_subscriber::fmt().with_env_filter(env_filter(DEFAULT_FILTER)).init();
}

/// Install the global fmt subscriber with an explicit fallback filter.
pub fn init_with_filter(filter: &str) {
    tracing_subscriber::fmt().with_env_filter(env_filter(filter)).init();
}

/// Install the global fmt subscriber unless one is already present.
///
/// Returns `false` when another subscriber was installed first.
pub fn try_init() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(DEFAULT_FILTER))
        .with_test_writer()
        .try_init()
        .is_ok()
}

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}
