//! Structured logging for the sketcher using `tracing`.
//!
//! # Log Levels
//!
//! - `debug`: every canvas operation, including silent no-ops
//! - `info`: entity creation and committed renames (default)
//! - `warn` / `error`: start-up problems
//!
//! # Environment Variables
//!
//! - `ERDSKETCH_LOG_LEVEL`: log level or filter directive
//! - `ERDSKETCH_LOG_FORMAT`: `compact`, `pretty` or `json`
//! - `RUST_LOG`: standard `tracing-subscriber` filter, used when the above are unset
//!
//! ```bash
//! RUST_LOG="erdsketch::canvas=debug" erdsketch
//! ```

use clap::ValueEnum;
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::error::{Error, Result};

/// Output layout of the fmt layer, selectable with `--log-format`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One line per event, no target
    #[default]
    Compact,
    /// Multi-line with source locations
    Pretty,
    /// Newline-delimited JSON
    Json,
}

/// Parse a format name the way the CLI does, ignoring case.
pub fn parse_format(name: &str) -> Result<LogFormat> {
    <LogFormat as ValueEnum>::from_str(name, true)
        .map_err(|_| Error::logging(format!("unknown log format `{name}`")))
}

/// Initialize the global tracing subscriber.
///
/// `level` falls back to `ERDSKETCH_LOG_LEVEL`, then `RUST_LOG`, then `info`.
/// `format` falls back to `ERDSKETCH_LOG_FORMAT`, then `compact`. Fails if a
/// subscriber is already installed or the format is unknown.
pub fn init_logging(level: Option<&str>, format: Option<LogFormat>) -> Result<()> {
    let log_level = level
        .map(|s| s.to_string())
        .or_else(|| std::env::var("ERDSKETCH_LOG_LEVEL").ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    let format = match format {
        Some(format) => format,
        None => match std::env::var("ERDSKETCH_LOG_FORMAT") {
            Ok(name) => parse_format(&name)?,
            Err(_) => LogFormat::default(),
        },
    };

    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = match format {
        LogFormat::Compact => Registry::default()
            .with(filter)
            .with(
                fmt::Layer::default()
                    .with_target(false)
                    .with_level(true)
                    .with_span_events(FmtSpan::NONE),
            )
            .try_init(),
        LogFormat::Pretty => Registry::default()
            .with(filter)
            .with(
                fmt::Layer::default()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .pretty(),
            )
            .try_init(),
        LogFormat::Json => Registry::default()
            .with(filter)
            .with(fmt::Layer::default().with_target(true).json())
            .try_init(),
    };
    installed.map_err(|e| Error::logging(e.to_string()))
}
