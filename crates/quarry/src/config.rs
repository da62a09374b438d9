use std::path::Path;

use chrono::FixedOffset;
use quarry_types::datetime::parse_offset;
use quarry_types::NullsOrder;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Engine configuration, parsed from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Offset applied to datetime text that carries none: `UTC`, `Z`, or
    /// `+09:00` style.
    #[serde(default = "default_location")]
    pub location: String,

    /// NULL placement for ORDER BY items that do not specify one.
    #[serde(default)]
    pub nulls: NullsPlacement,
}

fn default_location() -> String {
    "UTC".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
            nulls: NullsPlacement::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullsPlacement {
    /// NULLs first when ascending, last when descending.
    #[default]
    Low,
    First,
    Last,
}

impl From<NullsPlacement> for NullsOrder {
    fn from(placement: NullsPlacement) -> Self {
        match placement {
            NullsPlacement::Low => NullsOrder::Low,
            NullsPlacement::First => NullsOrder::First,
            NullsPlacement::Last => NullsOrder::Last,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// The configured location as a fixed offset.
    pub fn location_offset(&self) -> Result<FixedOffset> {
        parse_offset(&self.location).map_err(|e| Error::Config(format!("location: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn empty_document_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.location, "UTC");
        assert_eq!(config.nulls, NullsPlacement::Low);
        assert_eq!(config.location_offset().unwrap().local_minus_utc(), 0);
    }

    #[test]
    fn parses_location_and_nulls() {
        let config = EngineConfig::from_toml_str(
            r#"
location = "+09:00"
nulls = "last"
"#,
        )
        .unwrap();
        assert_eq!(config.location_offset().unwrap().local_minus_utc(), 9 * 3600);
        assert_eq!(NullsOrder::from(config.nulls), NullsOrder::Last);
    }

    #[test]
    fn rejects_unknown_nulls_placement() {
        let err = EngineConfig::from_toml_str(r#"nulls = "middle""#).unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn invalid_location_is_a_config_error() {
        let config = EngineConfig::from_toml_str(r#"location = "Mars/Olympus""#).unwrap();
        let err = config.location_offset().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().starts_with("config error: location:"));
    }

    #[test]
    fn load_reads_file() {
        let dir = std::env::temp_dir().join("quarry_config_tests");
        fs::create_dir_all(&dir).ok();
        let path = dir.join(format!("engine_{}.toml", std::process::id()));
        fs::write(&path, "nulls = \"first\"\n").unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.nulls, NullsPlacement::First);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("quarry_config_tests/does_not_exist.toml");
        assert!(matches!(EngineConfig::load(path), Err(Error::Io(_))));
    }
}
