//! Diagnostic logging setup
//!
//! Logs go to stderr so stdout only carries the report.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// Environment variable overriding the computed filter
pub const LOG_ENV: &str = "DEPENDR_LOG";

/// Level implied by the CLI flags; quiet wins over verbose
pub fn level_for(verbose: bool, quiet: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

/// Build the filter, preferring `DEPENDR_LOG` when it parses
fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose, quiet).to_string()))
}

/// Install the global subscriber
///
/// Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool, quiet: bool, color: bool) {
    let _ = registry()
        .with(build_filter(verbose, quiet))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(color),
        )
        .try_init();
}
