//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the tide-table.toml file.
//! It replaces the station constants (location label, timezone, UTC offset, year
//! and output path) with named fields so the converter can be pointed at another
//! station or year without code changes. Command-line flags override individual
//! fields after loading.

use crate::TideError;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "tide-table.toml";

/// Application configuration loaded from tide-table.toml
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Config {
    /// Station identity and clock
    pub location: LocationConfig,
    /// What to build and where to write it
    pub schedule: ScheduleConfig,
}

/// Tide station configuration
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct LocationConfig {
    /// Human-readable station name written to the output
    pub name: String,
    /// Timezone label written to the output (informational, never resolved)
    pub timezone: String,
    /// Offset of local table time from UTC in hours (Bahia is -3)
    pub utc_offset_hours: i32,
}

/// Output schedule configuration
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ScheduleConfig {
    /// Calendar year covered by the tide table
    pub year: i32,
    /// Destination JSON file
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            location: LocationConfig {
                name: "Ilhéus".to_string(),
                timezone: "America/Bahia".to_string(),
                utc_offset_hours: -3,
            },
            schedule: ScheduleConfig {
                year: 2026,
                output: PathBuf::from("ilheus-2026.json"),
            },
        }
    }
}

impl LocationConfig {
    /// The fixed offset used to convert table times to UTC.
    ///
    /// # Errors
    /// [`TideError::Config`] if the offset is not strictly within ±24 hours.
    pub fn offset(&self) -> Result<FixedOffset, TideError> {
        self.utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                TideError::Config(format!(
                    "utc_offset_hours {} is out of range",
                    self.utc_offset_hours
                ))
            })
    }
}

impl Config {
    /// Load configuration from tide-table.toml in the working directory
    pub fn load() -> Result<Self, TideError> {
        Self::load_from_path(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if the file doesn't exist
    ///
    /// # Errors
    /// - [`TideError::Config`] if the file exists but is not valid TOML for [`Config`]
    /// - [`TideError::Io`] if the file exists but cannot be read
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, TideError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => {
                let config = toml::from_str::<Config>(&contents).map_err(|e| {
                    TideError::Config(format!("{}: {}", path.display(), e))
                })?;
                info!(
                    "Loaded configuration for station: {}",
                    config.location.name
                );
                Ok(config)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(
                    "No config file at {}, using default configuration (Ilhéus)",
                    path.display()
                );
                Ok(Self::default())
            }
            Err(e) => Err(TideError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.location.name, "Ilhéus");
        assert_eq!(config.location.timezone, "America/Bahia");
        assert_eq!(config.location.utc_offset_hours, -3);
        assert_eq!(config.schedule.year, 2026);
        assert_eq!(config.schedule.output, PathBuf::from("ilheus-2026.json"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path").unwrap();
        // Should fallback to default
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_custom_file() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(
            temp_file.path(),
            r#"
[location]
name = "Salvador"
timezone = "America/Bahia"
utc_offset_hours = -3

[schedule]
year = 2027
output = "salvador-2027.json"
"#,
        )
        .unwrap();

        let config = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.location.name, "Salvador");
        assert_eq!(config.schedule.year, 2027);
        assert_eq!(config.schedule.output, PathBuf::from("salvador-2027.json"));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "[location]\nname = 42\n").unwrap();

        let result = Config::load_from_path(temp_file.path());
        assert!(matches!(result, Err(TideError::Config(_))));
    }

    #[test]
    fn test_offset_conversion() {
        let config = Config::default();
        let offset = config.location.offset().unwrap();
        assert_eq!(offset.local_minus_utc(), -3 * 3600);

        let mut bad = config.location.clone();
        bad.utc_offset_hours = 30;
        assert!(bad.offset().is_err());
    }
}
