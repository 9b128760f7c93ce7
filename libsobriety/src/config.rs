//! Configuration management for the sobriety tracker

use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::types::DEFAULT_DATE_FORMAT;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// strftime format used when recording a relapse
    pub date_format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    pub tick_rate_ms: u64,
    pub colors: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            colors: true,
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load from the default location, or fall back to defaults if no file exists
    pub fn load_or_default() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    fn validate(&self) -> std::result::Result<(), ConfigError> {
        let format = &self.display.date_format;
        if format.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "display.date_format".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::InvalidValue {
                field: "display.date_format".to_string(),
                reason: format!("unsupported specifier in '{}'", format),
            });
        }
        if self.tui.tick_rate_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tui.tick_rate_ms".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("SOBRIETY_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("sobriety").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SobrietyError;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.display.date_format, "%-m/%-d/%Y");
        assert_eq!(config.tui.tick_rate_ms, 250);
        assert!(config.tui.colors);
    }

    #[test]
    fn test_load_full_file() {
        let file = write_config(
            r#"
[display]
date_format = "%Y-%m-%d"

[tui]
tick_rate_ms = 100
colors = false
"#,
        );

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.display.date_format, "%Y-%m-%d");
        assert_eq!(config.tui.tick_rate_ms, 100);
        assert!(!config.tui.colors);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let file = write_config("[tui]\ncolors = false\n");

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.display, DisplayConfig::default());
        assert_eq!(config.tui.tick_rate_ms, 250);
        assert!(!config.tui.colors);
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let file = write_config("[display\n");

        let err = Config::load_from_path(file.path()).unwrap_err();
        assert!(matches!(err, SobrietyError::Config(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_bad_date_format_rejected() {
        let file = write_config("[display]\ndate_format = \"%Q\"\n");

        let err = Config::load_from_path(file.path()).unwrap_err();
        assert!(matches!(
            err,
            SobrietyError::Config(ConfigError::InvalidValue { ref field, .. }) if field == "display.date_format"
        ));
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let file = write_config("[tui]\ntick_rate_ms = 0\n");

        let err = Config::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("tui.tick_rate_ms"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Config::load_from_path(Path::new("/nonexistent/sobriety/config.toml")).unwrap_err();
        assert!(matches!(err, SobrietyError::Config(ConfigError::ReadError(_))));
    }

    #[test]
    #[serial]
    fn test_env_override_path() {
        let file = write_config("[tui]\ntick_rate_ms = 42\n");
        std::env::set_var("SOBRIETY_CONFIG", file.path());

        let path = resolve_config_path().unwrap();
        let config = Config::load().unwrap();
        std::env::remove_var("SOBRIETY_CONFIG");

        assert_eq!(path, file.path());
        assert_eq!(config.tui.tick_rate_ms, 42);
    }

    #[test]
    #[serial]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("SOBRIETY_CONFIG", dir.path().join("absent.toml"));

        let config = Config::load_or_default().unwrap();
        std::env::remove_var("SOBRIETY_CONFIG");

        assert_eq!(config, Config::default());
    }
}
