use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

/// Environment variable that overrides the configured API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file could not be read: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Io(_) => "Could not read the configuration file. Check its permissions.",
            ConfigError::Parse(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeatherMap API key. The `OPENWEATHER_API_KEY` environment
    /// variable takes precedence over the file value.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Override for the weather API base URL (testing/proxying).
    #[serde(default)]
    pub api_base: Option<String>,

    /// Override for the map tile base URL.
    #[serde(default)]
    pub tile_base: Option<String>,
}

impl Config {
    /// Path of the configuration file (`<config_dir>/skycast/config.toml`).
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("skycast").join("config.toml"))
    }

    /// Load configuration from disk, falling back to defaults when the file
    /// is absent, then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let raw = fs::read_to_string(&path)?;
                let config: Config = toml::from_str(&raw)?;
                tracing::debug!("Loaded configuration from {}", path.display());
                config
            }
            _ => {
                tracing::debug!("No configuration file found, using defaults");
                Config::default()
            }
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                config.api_key = Some(key);
            }
        }

        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// A missing API key is a warning here: requests fail fast with a typed
    /// error at call time, and commands that build no request still work.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.api_key.as_deref().map_or(true, str::is_empty) {
            result.add_warning(
                "api_key",
                format!("no API key configured; set {API_KEY_ENV} or api_key in config.toml"),
            );
        }

        if let Some(base) = &self.api_base {
            if Url::parse(base).is_err() {
                result.add_error("api_base", format!("not a valid URL: {base}"));
            }
        }

        if let Some(base) = &self.tile_base {
            if Url::parse(base).is_err() {
                result.add_error("tile_base", format!("not a valid URL: {base}"));
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn default_config_has_no_key() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert!(config.api_base.is_none());
    }

    #[test]
    fn parses_minimal_toml() {
        let config: Config = toml::from_str(r#"api_key = "abc123""#).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("abc123"));
        assert!(config.api_base.is_none());
    }

    #[test]
    fn missing_key_is_warning_not_error() {
        let result = Config::default().validate();
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].field, "api_key");
    }

    #[test]
    fn bad_base_url_is_error() {
        let config = Config {
            api_key: Some("k".into()),
            api_base: Some("not a url".into()),
            tile_base: None,
        };
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.error_summary().contains("api_base"));
    }

    #[test]
    fn valid_base_url_passes() {
        let config = Config {
            api_key: Some("k".into()),
            api_base: Some("https://api.example.com".into()),
            tile_base: Some("https://tiles.example.com".into()),
        };
        assert!(config.validate().is_valid());
    }
}
