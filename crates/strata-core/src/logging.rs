//! Tracing subscriber setup.
//!
//! The engine only emits `tracing` events; binaries and tests that want to
//! see them call [`init_tracing`] once.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Environment variable overriding the default filter directive.
pub const LOG_ENV_VAR: &str = "STRATA_LOG";

static INIT: Once = Once::new();

/// Install a stderr `fmt` subscriber filtered by `STRATA_LOG` (or `default_directive`).
///
/// Safe to call repeatedly; only the first call has an effect, and an
/// already-installed global subscriber is left in place.
pub fn init_tracing(default_directive: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(default_directive));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
