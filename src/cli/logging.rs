//! Logging setup
//!
//! The subscriber is installed before the command line is parsed so that
//! diagnostics from validation and config loading are not lost. Its level
//! is adjusted once the config file and `-debug` are known.

use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

const CRATE_TARGET: &str = "depot_downloader";

/// Handle for changing the crate log level after startup
pub struct LogLevelHandle(reload::Handle<EnvFilter, Registry>);

impl LogLevelHandle {
    /// Replace the crate level, keeping any `RUST_LOG` directives
    pub fn set_level(&self, level: &str) {
        if let Err(e) = self.0.reload(level_filter(level)) {
            eprintln!("Warning: Unable to change log level to {}: {}", level, e);
        }
    }

    fn current(&self) -> Option<String> {
        self.0.with_current(|filter| filter.to_string()).ok()
    }
}

/// Build the filter for `level`, honouring `RUST_LOG` for other targets
fn level_filter(level: &str) -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match format!("{}={}", CRATE_TARGET, level).parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Install the global subscriber at `level`
///
/// Must be called once per process.
pub fn init_logging(level: &str) -> LogLevelHandle {
    let (filter, handle) = reload::Layer::new(level_filter(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();

    LogLevelHandle(handle)
}
