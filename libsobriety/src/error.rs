//! Error types for the sobriety tracker
//!
//! The state core never fails. These cover the layers around it:
//! configuration, user input, and I/O.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SobrietyError>;

#[derive(Error, Debug)]
pub enum SobrietyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Malformed message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SobrietyError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SobrietyError::InvalidInput(_) => 3,
            SobrietyError::Json(_) => 3,
            SobrietyError::Config(_) => 1,
            SobrietyError::Io(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
