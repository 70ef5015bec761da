//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt};

const LOG_ENV: &str = "FILEPICK_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

/// Install the global subscriber.
///
/// Filters come from `FILEPICK_LOG`, then `RUST_LOG`, then `warn`. Output goes to stderr so that
/// stdout only ever carries the picked paths.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
    };

    let _ = fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
