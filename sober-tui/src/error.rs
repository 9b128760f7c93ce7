//! Error types for sober-tui
//!
//! Wraps tracker errors and terminal/IO errors for unified error handling.

use thiserror::Error;

/// TUI-specific errors
#[derive(Error, Debug)]
pub enum TuiError {
    /// Tracker (state core, config, input) error
    #[error("Tracker error: {0}")]
    Tracker(#[from] libsobriety::SobrietyError),

    /// Terminal/IO error
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Result type for TUI operations
pub type Result<T> = std::result::Result<T, TuiError>;
