//! Structured logging setup for hosts embedding resbundle.
//!
//! The bundle crates only emit `tracing` events; installing a subscriber is
//! left to the owning application. [`init_logging`] is the one-call way to do
//! that with an [`EnvFilter`] and a formatting layer.

use std::sync::Mutex;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Result type for logging initialization.
pub type LoggingResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line, human oriented output.
    #[default]
    Pretty,
    /// Single-line output.
    Compact,
    /// Newline-delimited JSON objects.
    Json,
}

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter directive (e.g. "info", "resbundle=debug")
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Optional file path; stdout is used when absent
    pub file_path: Option<String>,
    /// Whether to emit span open/close events
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            file_path: None,
            include_spans: false,
            include_targets: true,
        }
    }
}

impl LoggingConfig {
    /// Debug level, pretty output with spans. Meant for local development.
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            include_spans: true,
            ..Self::default()
        }
    }

    /// Info level JSON lines appended to `log_file`.
    pub fn production(log_file: impl Into<String>) -> Self {
        Self {
            format: LogFormat::Json,
            file_path: Some(log_file.into()),
            ..Self::default()
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info"))
    }

    fn span_events(&self) -> FmtSpan {
        if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Install a global tracing subscriber built from `config`.
///
/// Fails if the log file cannot be opened or a global subscriber is already
/// installed.
pub fn init_logging(config: LoggingConfig) -> LoggingResult {
    let (writer, ansi) = match &config.file_path {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stdout), true),
    };

    let layer = fmt::layer()
        .with_span_events(config.span_events())
        .with_target(config.include_targets)
        .with_ansi(ansi)
        .with_writer(writer);
    let registry = tracing_subscriber::registry().with(config.env_filter());

    match config.format {
        LogFormat::Pretty => registry.with(layer.pretty()).try_init()?,
        LogFormat::Compact => registry.with(layer.compact()).try_init()?,
        LogFormat::Json => registry.with(layer.json()).try_init()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.file_path.is_none());
        assert!(!config.include_spans);
        assert!(config.include_targets);
    }

    #[test]
    fn test_production_config() {
        let config = LoggingConfig::production("bundle.log");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.file_path.as_deref(), Some("bundle.log"));
        assert_eq!(config.level, "info");
    }

    #[test]
    fn test_span_events_follow_config() {
        assert_eq!(LoggingConfig::default().span_events(), FmtSpan::NONE);
        assert_eq!(
            LoggingConfig::development().span_events(),
            FmtSpan::NEW | FmtSpan::CLOSE
        );
    }
}
