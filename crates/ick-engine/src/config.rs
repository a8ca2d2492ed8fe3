//! Engine Configuration
//!
//! Optional TOML file, every key falls back to its default:
//!
//! ```toml
//! max_depth = 25
//! log_filter = "info"
//! ```

use std::path::{Path, PathBuf};

use ick_markup::{RenderConfig, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};

/// Hard upper bound for `max_depth`
pub const MAX_DEPTH_LIMIT: usize = 256;

/// Engine configuration options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Deepest component nesting level, the top-level composer being 0
    pub max_depth: usize,

    /// tracing filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            log_filter: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl Config {
    /// Parse and validate TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, defaults when it does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// TOML rendering, usable as a template
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "max_depth {} is over {}",
                self.max_depth, MAX_DEPTH_LIMIT
            )));
        }
        Ok(())
    }

    /// Renderer settings
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            max_depth: self.max_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.max_depth, 25);
        assert_eq!(config.render_config(), RenderConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let config = Config::from_toml_str("max_depth = 8").unwrap();
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_invalid_files() {
        assert!(matches!(
            Config::from_toml_str("max_depth = \"deep\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::from_toml_str("max_depth = 100000"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_template_round_trip() {
        let config = Config {
            max_depth: 12,
            log_filter: "ick_markup=debug".to_string(),
        };
        let text = config.to_toml().unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load("/nonexistent/ick/config.toml").unwrap();
        assert_eq!(config, Config::default());
    }
}
