//! Diagnostic logging for the schema-report binary
//!
//! Standard output carries the report itself, so every log line goes to
//! standard error. `RUST_LOG` takes precedence over the configured filter.

use std::io::IsTerminal;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

const CRATES: [&str; 3] = [
    "schema_report_cli",
    "schema_report_core",
    "schema_report_driver_sqlite",
];

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default log level filter, used when `RUST_LOG` is unset
    pub default_filter: String,

    /// Whether to include file/line information in logs
    pub include_location: bool,

    /// Whether to log span open/close events
    pub enable_spans: bool,

    /// Whether to colour output; off when stderr is not a terminal
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::from_verbosity(0)
    }
}

impl LoggingConfig {
    /// Map the number of `-v` flags to a filter for this workspace's crates.
    ///
    /// Third-party crates stay at `warn` regardless.
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        let mut default_filter = String::from("warn");
        for krate in CRATES {
            default_filter.push_str(&format!(",{}={}", krate, level));
        }

        Self {
            default_filter,
            include_location: verbosity >= 3,
            enable_spans: verbosity >= 3,
            ansi: std::io::stderr().is_terminal(),
        }
    }
}

/// Initialize the logging system with the given configuration
///
/// Fails if a global subscriber has already been installed.
pub fn init(config: LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let span_events = if config.enable_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_span_events(span_events)
        .with_ansi(config.ansi)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).try_init()?;

    tracing::debug!(filter = %config.default_filter, "Logging system initialized");
    Ok(())
}
