//! Rune bidi configuration system
//!
//! This crate provides centralized configuration management for the bidi
//! engine, loading settings from `rune.toml` with environment variable
//! overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RuneConfig {
    /// Bidirectional text settings
    pub bidi: BidiConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

/// Paragraph direction used when the caller does not supply a base level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DefaultDirection {
    /// Detect from the first strong character of each paragraph.
    #[default]
    Auto,
    Ltr,
    Rtl,
}

impl DefaultDirection {
    /// Parse the values accepted in `rune.toml` and `RUNE_BIDI_DIRECTION`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "ltr" => Some(Self::Ltr),
            "rtl" => Some(Self::Rtl),
            _ => None,
        }
    }
}

/// Bidirectional text configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BidiConfig {
    /// Base direction for paragraphs when no explicit level is given
    pub default_direction: DefaultDirection,
    /// Replace characters at odd levels by their mirrored glyph when
    /// producing reordered text
    pub mirror_brackets: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// `env_logger` style filter, e.g. `rune_bidi=trace`
    pub filter: Option<String>,
}

impl Default for BidiConfig {
    fn default() -> Self {
        Self {
            default_direction: DefaultDirection::Auto,
            mirror_brackets: true,
        }
    }
}

fn env_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl RuneConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from the default location (rune.toml in the current directory)
    /// or return default configuration if file doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_from_file("rune.toml").unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// Unparseable values are ignored.
    pub fn merge_with_env(&mut self) {
        if let Ok(val) = std::env::var("RUNE_BIDI_DIRECTION") {
            if let Some(direction) = DefaultDirection::parse(&val) {
                self.bidi.default_direction = direction;
            }
        }
        if let Ok(val) = std::env::var("RUNE_BIDI_MIRROR") {
            self.bidi.mirror_brackets = env_flag(&val);
        }
        if let Ok(filter) = std::env::var("RUNE_LOG") {
            self.logging.filter = Some(filter);
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from rune.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = RuneConfig::default();
        assert_eq!(config.bidi.default_direction, DefaultDirection::Auto);
        assert!(config.bidi.mirror_brackets);
        assert!(config.logging.filter.is_none());
    }

    #[test]
    fn test_toml_serialization() {
        let mut config = RuneConfig::default();
        config.bidi.default_direction = DefaultDirection::Rtl;
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: RuneConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.bidi.default_direction, DefaultDirection::Rtl);
        assert!(parsed.bidi.mirror_brackets);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[bidi]\ndefault_direction = \"ltr\"").unwrap();

        let config = RuneConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.bidi.default_direction, DefaultDirection::Ltr);
        assert!(config.bidi.mirror_brackets);
    }

    #[test]
    fn test_invalid_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[bidi]\ndefault_direction = \"sideways\"").unwrap();

        let err = RuneConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = RuneConfig::load_from_file("/nonexistent/rune.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!(DefaultDirection::parse(" RTL "), Some(DefaultDirection::Rtl));
        assert_eq!(DefaultDirection::parse("auto"), Some(DefaultDirection::Auto));
        assert_eq!(DefaultDirection::parse("up"), None);
    }

    #[test]
    fn test_merge_with_env() {
        unsafe {
            std::env::set_var("RUNE_BIDI_DIRECTION", "rtl");
            std::env::set_var("RUNE_BIDI_MIRROR", "false");
        }

        let mut config = RuneConfig::default();
        config.merge_with_env();

        assert_eq!(config.bidi.default_direction, DefaultDirection::Rtl);
        assert!(!config.bidi.mirror_brackets);

        unsafe {
            std::env::remove_var("RUNE_BIDI_DIRECTION");
            std::env::remove_var("RUNE_BIDI_MIRROR");
        }
    }
}
