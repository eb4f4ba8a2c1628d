//! Logging setup for the `sprint` binary.
//!
//! Installs a global `tracing` subscriber writing to stderr so that reports
//! printed on stdout stay machine-readable. `RUST_LOG` wins over the
//! verbosity flags when it is set.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Trace,
}

impl Verbosity {
    /// `-q` beats any number of `-v`.
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, 0) => Verbosity::Normal,
            (false, 1) => Verbosity::Verbose,
            (false, _) => Verbosity::Trace,
        }
    }

    pub fn default_directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "warn",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
            Verbosity::Trace => "trace",
        }
    }
}

fn build_env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.default_directive()))
}

/// Installs the global subscriber. Returns `false` when one was already
/// installed; the existing subscriber is kept.
pub fn init(verbosity: Verbosity) -> bool {
    tracing_subscriber::registry()
        .with(build_env_filter(verbosity))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .is_ok()
}
