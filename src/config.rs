use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as boolean: {value}")]
    ParseBool { name: String, value: String },
}

/// How classification results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable `key: value` blocks
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidValue {
                name: "LINKVIEW_FORMAT".to_string(),
                message: format!("must be 'text' or 'json', got '{value}'"),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
        })
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub format: OutputFormat,
    /// Unwrap redirects and trim input before classifying.
    pub sanitize: bool,
    /// Drop tracking query parameters after sanitizing.
    pub strip_tracking: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            sanitize: true,
            strip_tracking: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            format: optional_env("LINKVIEW_FORMAT")
                .map(|v| v.parse::<OutputFormat>())
                .transpose()?
                .unwrap_or(defaults.format),
            sanitize: parse_env_bool("LINKVIEW_SANITIZE", defaults.sanitize)?,
            strip_tracking: parse_env_bool("LINKVIEW_STRIP_TRACKING", defaults.strip_tracking)?,
        })
    }
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn parse_env_bool(name: &str, default: bool) -> Result<bool, ConfigError> {
    optional_env(name).map_or(Ok(default), |val| parse_bool(name, &val))
}

fn parse_bool(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::ParseBool {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    const VARS: &[&str] = &[
        "LINKVIEW_FORMAT",
        "LINKVIEW_SANITIZE",
        "LINKVIEW_STRIP_TRACKING",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("X", "Yes").unwrap());
        assert!(parse_bool("X", "1").unwrap());
        assert!(!parse_bool("X", "off").unwrap());
        assert!(matches!(
            parse_bool("X", "maybe"),
            Err(ConfigError::ParseBool { .. })
        ));
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        assert_eq!(Config::from_env().unwrap(), Config::default());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("LINKVIEW_FORMAT", "json");
        std::env::set_var("LINKVIEW_SANITIZE", "false");
        std::env::set_var("LINKVIEW_STRIP_TRACKING", "on");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.format, OutputFormat::Json);
        assert!(!config.sanitize);
        assert!(config.strip_tracking);
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_values() {
        clear_env();
        std::env::set_var("LINKVIEW_FORMAT", "xml");
        let err = Config::from_env().unwrap_err();
        clear_env();

        assert!(err.to_string().contains("LINKVIEW_FORMAT"));
    }
}
