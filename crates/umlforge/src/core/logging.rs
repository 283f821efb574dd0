//! Logging infrastructure for diagram conversion
//!
//! Structured logging through the `tracing` crate. The library itself only
//! emits spans and events; binaries and tests decide whether and how to
//! install a subscriber by calling [`init_logging`].
//!
//! # Log Formats
//!
//! - `compact`: Single-line format, good for production
//! - `pretty`: Multi-line format with colors, good for development
//! - `json`: JSON format, good for log aggregation systems
//!
//! # Environment Variables
//!
//! - `UMLFORGE_LOG_LEVEL`: Set log level (trace|debug|info|warn|error|off)
//! - `UMLFORGE_LOG_FORMAT`: Set log format (compact|pretty|json)
//! - `RUST_LOG`: Standard `tracing-subscriber` filter, also honored
//!
//! # Filtering Logs
//!
//! ```bash
//! # Parser internals only
//! RUST_LOG="umlforge::plugins::drawio::parser=trace" umlforge convert -i model.drawio -o out
//! ```

use std::str::FromStr;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact single-line format
    Compact,
    /// Pretty multi-line format with colors
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl LogFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Install a global subscriber writing to stderr
///
/// `level` falls back to `UMLFORGE_LOG_LEVEL`, then `RUST_LOG`, then
/// `info`; `format` falls back to `UMLFORGE_LOG_FORMAT`, then `compact`.
/// Fails on an unknown format or when a subscriber is already installed;
/// the format is checked before anything global is touched.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = setting(level, &["UMLFORGE_LOG_LEVEL", "RUST_LOG"], "info");
    let format = setting(format, &["UMLFORGE_LOG_FORMAT"], "compact");
    let format = LogFormat::from_str(&format).map_err(|e| format!("Invalid log format: {}", e))?;

    Registry::default()
        .with(output_layer(format))
        .with(level_filter(&level))
        .try_init()?;

    Ok(())
}

/// First of: the explicit value, the named environment variables, `default`
fn setting(explicit: Option<&str>, env_vars: &[&str], default: &str) -> String {
    explicit
        .map(str::to_string)
        .or_else(|| env_vars.iter().find_map(|var| std::env::var(var).ok()))
        .unwrap_or_else(|| default.to_string())
}

/// `RUST_LOG` directives win over `level`; unparseable levels mean `info`
fn level_filter(level: &str) -> EnvFilter {
    if level == "off" {
        return EnvFilter::new("off");
    }
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn output_layer(format: LogFormat) -> Box<dyn Layer<Registry> + Send + Sync> {
    let layer = fmt::layer().with_writer(std::io::stderr).with_level(true);
    match format {
        LogFormat::Compact => layer
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_span_events(FmtSpan::NONE)
            .boxed(),
        LogFormat::Pretty => layer
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_span_events(FmtSpan::ACTIVE)
            .pretty()
            .boxed(),
        LogFormat::Json => layer
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_span_events(FmtSpan::ACTIVE)
            .json()
            .boxed(),
    }
}

/// Initialize logging with default settings (info level, compact format)
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(None, None)
}
