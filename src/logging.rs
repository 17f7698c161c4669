//! Diagnostic logging
//!
//! `tracing` events go to stderr so they never mix with command output on
//! stdout. The filter comes from `SPENDWISE_LOG` (same syntax as `RUST_LOG`).

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "SPENDWISE_LOG";

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber; later calls are no-ops
///
/// `verbose` raises the default level for this crate to debug. An explicit
/// `SPENDWISE_LOG` always wins.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let default_filter = if verbose {
            "spendwise=debug"
        } else {
            "spendwise=warn"
        };
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
