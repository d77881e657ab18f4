//! Filter settings loaded from TOML.
//!
//! - `parse_settings_toml(text)` parses and validates a settings document
//! - `default_toml()` returns the embedded defaults
//! - `Settings::open(path)` reads a settings file from disk

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::filter::FilterConfig;
use crate::romanize::PinyinFormat;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Upper bound for `filter.min_term_length`.
const MAX_MIN_TERM_LENGTH: usize = 256;

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub filter: FilterConfig,
    /// Not checked here: an inconsistent format surfaces as a logged
    /// lookup failure at filter time.
    #[serde(default)]
    pub format: PinyinFormat,
}

impl Settings {
    pub fn open(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        parse_settings_toml(&content)
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    // Values below the floor are raised by FilterConfig::normalized.
    if s.filter.min_term_length > MAX_MIN_TERM_LENGTH {
        return Err(SettingsError::InvalidValue {
            field: "filter.min_term_length".to_string(),
            reason: format!("must be at most {MAX_MIN_TERM_LENGTH}"),
        });
    }
    Ok(())
}
