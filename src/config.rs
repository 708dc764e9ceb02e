//! Configuration for the card number field
//!
//! Segment capacities, input filtering, and the transition duration used by
//! hosts that animate layout changes. Stored as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::classifier::Layout;
use crate::error::{ConfigError, ConfigResult};

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "CARD_NUMBER_FIELD_CONFIG";

/// Shortest capacity that can still trigger auto-advance: completion is only
/// evaluated once a segment holds more than two characters.
pub const MIN_SEGMENT_CAPACITY: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardFieldConfig {
    /// Capacity of the free-form field used before the network is known
    pub single_capacity: usize,
    /// Per-segment capacities of the three-field layout
    pub three_capacities: Vec<usize>,
    /// Per-segment capacities of the four-field layout
    pub four_capacities: Vec<usize>,
    /// Strip and refuse non-digit characters at the input boundary
    pub digits_only: bool,
    /// Duration of the group fade when the layout changes, in milliseconds
    pub transition_ms: u64,
}

impl Default for CardFieldConfig {
    fn default() -> Self {
        Self {
            // ISO/IEC 7812 allows up to 19 digits
            single_capacity: 19,
            three_capacities: vec![4, 6, 5],
            four_capacities: vec![4, 4, 4, 4],
            digits_only: true,
            transition_ms: 200,
        }
    }
}

impl CardFieldConfig {
    /// Segment capacities for a layout, in tag order
    pub fn capacities(&self, layout: Layout) -> Vec<usize> {
        match layout {
            Layout::Single => vec![self.single_capacity],
            Layout::Three => self.three_capacities.clone(),
            Layout::Four => self.four_capacities.clone(),
        }
    }

    /// Check segment counts and capacities
    pub fn validate(&self) -> ConfigResult<()> {
        for (parameter, layout) in [
            ("three_capacities", Layout::Three),
            ("four_capacities", Layout::Four),
        ] {
            let capacities = self.capacities(layout);
            if capacities.len() != layout.field_count() {
                return Err(ConfigError::InvalidParameter {
                    parameter: parameter.to_string(),
                    value: format!("{capacities:?}"),
                    reason: format!("expected {} segment capacities", layout.field_count()),
                });
            }
        }

        for layout in Layout::ALL {
            if let Some(capacity) = self
                .capacities(layout)
                .into_iter()
                .find(|capacity| *capacity < MIN_SEGMENT_CAPACITY)
            {
                return Err(ConfigError::InvalidParameter {
                    parameter: format!("{layout:?} capacity").to_lowercase(),
                    value: capacity.to_string(),
                    reason: format!("segments must hold at least {MIN_SEGMENT_CAPACITY} digits"),
                });
            }
        }

        Ok(())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse and validate a JSON document. Missing keys take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::ParseError {
            path: "<inline>".to_string(),
            error: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate the config file at `path`
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let json = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config: Self = serde_json::from_str(&json).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        config.validate()?;
        debug!("Loaded card field config from {}", path.display());
        Ok(config)
    }

    /// Write the config to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
            }
        }

        let json = self.to_json().map_err(|e| ConfigError::FileError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        fs::write(path, json).map_err(|e| ConfigError::io(path, e))
    }
}

/// Determine the default config file path.
/// Priority:
/// 1) CARD_NUMBER_FIELD_CONFIG env var
/// 2) Platform config dir: <config_dir>/card-number-field/config.json
/// 3) Current directory fallback: ./card-number-field.json
pub fn default_config_path() -> PathBuf {
    if let Ok(p) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(p);
    }

    dirs::config_dir()
        .map(|dir| dir.join("card-number-field").join("config.json"))
        .unwrap_or_else(|| PathBuf::from("card-number-field.json"))
}

/// Load the config from the default path if present; otherwise return
/// defaults. A present but broken file is reported and ignored.
pub fn load_config() -> CardFieldConfig {
    let path = default_config_path();
    if !path.exists() {
        debug!("No config at {}, using defaults", path.display());
        return CardFieldConfig::default();
    }

    match CardFieldConfig::load_from(&path) {
        Ok(config) => config,
        Err(e) => {
            warn!("Ignoring config file: {e}");
            CardFieldConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = CardFieldConfig::default();
        assert_eq!(config.capacities(Layout::Single), vec![19]);
        assert_eq!(config.capacities(Layout::Three), vec![4, 6, 5]);
        assert_eq!(config.capacities(Layout::Four), vec![4, 4, 4, 4]);
        assert!(config.digits_only);
        assert_eq!(config.transition_ms, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = CardFieldConfig::from_json(r#"{ "digits_only": false }"#)
            .expect("partial config should parse");
        assert!(!config.digits_only);
        assert_eq!(config.four_capacities, vec![4, 4, 4, 4]);
    }

    #[test]
    fn test_wrong_segment_count_rejected() {
        let result = CardFieldConfig::from_json(r#"{ "three_capacities": [4, 11] }"#);
        match result {
            Err(ConfigError::InvalidParameter { parameter, .. }) => {
                assert_eq!(parameter, "three_capacities");
            }
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_tiny_capacity_rejected() {
        let config = CardFieldConfig {
            four_capacities: vec![4, 2, 4, 4],
            ..CardFieldConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            CardFieldConfig::from_json("{ not json"),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_serialization_round_trip() {
        let config = CardFieldConfig {
            single_capacity: 16,
            transition_ms: 0,
            ..CardFieldConfig::default()
        };
        let json = config.to_json().expect("Serialization should work");
        assert!(json.contains("single_capacity"));
        assert_eq!(CardFieldConfig::from_json(&json).expect("Deserialization should work"), config);
    }
}
