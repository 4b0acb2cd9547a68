//! Trainer settings.
//!
//! Every field has a built-in default, so an empty TOML document is a valid
//! config. Front ends load a file if the user gives one and then apply their
//! own command-line overrides on top.

use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::stats::{DEFAULT_HISTORY_DAYS, DEFAULT_RECENT_LIMIT};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainerConfig {
    /// Delay before a new relative question replaces an answered one.
    pub relative_advance_ms: u64,

    /// Delay before a new sequence replaces a completed one.
    pub ordinance_advance_ms: u64,

    /// Lowest reference staff position (0 = bottom line).
    pub staff_min: i32,

    /// Highest reference staff position (8 = top line).
    pub staff_max: i32,

    /// Days kept in daily charts.
    pub history_days: usize,

    /// Attempts returned by recent-history queries.
    pub recent_limit: usize,

    /// Where history is stored. `None` means the platform data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            relative_advance_ms: 2000,
            ordinance_advance_ms: 1000,
            staff_min: -2,
            staff_max: 10,
            history_days: DEFAULT_HISTORY_DAYS,
            recent_limit: DEFAULT_RECENT_LIMIT,
            data_dir: None,
        }
    }
}

impl TrainerConfig {
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let src = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&src)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.staff_min > self.staff_max {
            return Err(ConfigError::Invalid(format!(
                "staff_min ({}) is above staff_max ({})",
                self.staff_min, self.staff_max
            )));
        }
        if self.history_days == 0 {
            return Err(ConfigError::Invalid("history_days must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn staff_range(&self) -> RangeInclusive<i32> {
        self.staff_min..=self.staff_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = TrainerConfig::from_toml_str("").unwrap();
        assert_eq!(config, TrainerConfig::default());
        assert_eq!(config.staff_range(), -2..=10);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = TrainerConfig::from_toml_str("relative_advance_ms = 500\nstaff_max = 8\n").unwrap();
        assert_eq!(config.relative_advance_ms, 500);
        assert_eq!(config.staff_max, 8);
        assert_eq!(config.ordinance_advance_ms, 1000);
    }

    #[test]
    fn inverted_staff_range_is_rejected() {
        let err = TrainerConfig::from_toml_str("staff_min = 4\nstaff_max = 2\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = TrainerConfig::from_toml_str("volume = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
