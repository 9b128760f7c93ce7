//! Centralized logging configuration for the sobriety tracker binaries
//!
//! Provides consistent logging setup with support for:
//! - Text, JSON, and pretty-printed output
//! - Environment variable configuration
//! - Logging to a file for full-screen frontends that own the terminal
//!
//! # Examples
//!
//! ```no_run
//! use libsobriety::logging::{LoggingConfig, LogFormat};
//!
//! // Initialize with JSON format
//! let config = LoggingConfig::new(LogFormat::Json, "info".to_string(), false);
//! config.init();
//!
//! // Or use default settings (respects env vars)
//! libsobriety::logging::init_default();
//! ```

use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text output (no colors, for piping)
    Text,
    /// Machine-parseable JSON (one JSON object per line)
    Json,
    /// Pretty-printed with colors (for development)
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(format!(
                "Invalid log format: '{}'. Valid options: text, json, pretty",
                s
            )),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
            LogFormat::Pretty => write!(f, "pretty"),
        }
    }
}

/// Configuration for logging initialization
pub struct LoggingConfig {
    pub format: LogFormat,
    pub level: String,
    pub verbose: bool,
}

impl LoggingConfig {
    /// Create a new logging configuration
    ///
    /// # Arguments
    ///
    /// * `format` - Log output format (text, json, or pretty)
    /// * `level` - Minimum log level (error, warn, info, debug, trace)
    /// * `verbose` - If true, defaults to debug level
    pub fn new(format: LogFormat, level: String, verbose: bool) -> Self {
        Self {
            format,
            level,
            verbose,
        }
    }

    /// Build from `SOBRIETY_LOG_FORMAT` / `SOBRIETY_LOG_LEVEL`, defaulting to text at info
    pub fn from_env() -> Self {
        let format = std::env::var("SOBRIETY_LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(LogFormat::Text);

        let level = std::env::var("SOBRIETY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self::new(format, level, false)
    }

    /// Filter directive used when `RUST_LOG` is not set
    pub fn default_directive(&self) -> &str {
        if self.verbose {
            "debug"
        } else {
            &self.level
        }
    }

    /// Initialize logging to stderr
    ///
    /// # Panics
    ///
    /// Panics if the logging subscriber has already been initialized
    pub fn init(&self) {
        self.install(std::io::stderr, true);
    }

    /// Initialize logging appended to `path`, without ANSI colors
    ///
    /// # Panics
    ///
    /// Panics if the logging subscriber has already been initialized
    pub fn init_with_file(&self, path: &Path) -> std::io::Result<()> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        self.install(Mutex::new(file), false);
        Ok(())
    }

    fn install<W>(&self, writer: W, ansi: bool)
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_directive()));

        match self.format {
            LogFormat::Json => {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(writer)
                    .with_current_span(true)
                    .with_span_list(true)
                    .flatten_event(true)
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::fmt()
                    .pretty()
                    .with_env_filter(filter)
                    .with_writer(writer)
                    .with_ansi(ansi)
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .init();
            }
            LogFormat::Text => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(writer)
                    .with_ansi(ansi)
                    .with_target(false)
                    .with_level(true)
                    .init();
            }
        }
    }
}

/// Initialize stderr logging with default settings
///
/// Respects `SOBRIETY_LOG_FORMAT` and `SOBRIETY_LOG_LEVEL` environment variables.
/// Falls back to text format with info level if not set.
pub fn init_default() {
    LoggingConfig::from_env().init();
}
