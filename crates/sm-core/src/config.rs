//! Viewer configuration

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::GeoCoord;

/// Errors raised while reading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid population range: min {min} exceeds max {max}")]
    InvalidPopulationRange { min: u64, max: u64 },

    #[error("Sample size must be at least 1")]
    InvalidSampleSize,
}

/// Base map defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapDefaults {
    /// Initial view center
    pub center: GeoCoord,

    /// Initial zoom level
    pub zoom: f64,

    /// Highest zoom the backdrop serves
    pub max_zoom: f64,

    /// Tile URL template (`{s}`, `{z}`, `{x}`, `{y}` placeholders)
    pub tile_url_template: String,

    /// Attribution line drawn over the map
    pub attribution: String,
}

impl Default for MapDefaults {
    fn default() -> Self {
        Self {
            // Centered on India
            center: GeoCoord::new(22.5937, 82.9629),
            zoom: 5.0,
            max_zoom: 18.0,
            tile_url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "© OpenStreetMap contributors".to_string(),
        }
    }
}

/// Inclusive bounds for synthetic populations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationRange {
    pub min: u64,
    pub max: u64,
}

impl Default for PopulationRange {
    fn default() -> Self {
        Self {
            min: 500_000,
            max: 50_000_000,
        }
    }
}

/// Top-level viewer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// GeoJSON file with the state boundaries
    pub data_path: PathBuf,

    pub map: MapDefaults,

    pub population: PopulationRange,

    /// Number of features listed in the random sample
    pub sample_size: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/india-states.geojson"),
            map: MapDefaults::default(),
            population: PopulationRange::default(),
            sample_size: 5,
        }
    }
}

impl ViewerConfig {
    /// Parse and validate a JSON configuration. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: ViewerConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Read `path` if it exists, otherwise use the defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population.min > self.population.max {
            return Err(ConfigError::InvalidPopulationRange {
                min: self.population.min,
                max: self.population.max,
            });
        }
        if self.sample_size == 0 {
            return Err(ConfigError::InvalidSampleSize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ViewerConfig::from_json(r#"{ "sample_size": 3, "map": { "zoom": 6 } }"#).unwrap();

        assert_eq!(config.sample_size, 3);
        assert_eq!(config.map.zoom, 6.0);
        assert_eq!(config.map.center, GeoCoord::new(22.5937, 82.9629));
        assert_eq!(config.population, PopulationRange::default());
        assert_eq!(config.data_path, PathBuf::from("data/india-states.geojson"));
    }

    #[test]
    fn test_invalid_population_range_rejected() {
        let result = ViewerConfig::from_json(r#"{ "population": { "min": 10, "max": 5 } }"#);
        assert!(matches!(result, Err(ConfigError::InvalidPopulationRange { min: 10, max: 5 })));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(ViewerConfig::from_json("{ not json"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("statemap.json");
        assert_eq!(ViewerConfig::load_or_default(&missing).unwrap(), ViewerConfig::default());

        let mut file = std::fs::File::create(&missing).unwrap();
        write!(file, r#"{{ "data_path": "boundaries.geojson" }}"#).unwrap();
        let config = ViewerConfig::load_or_default(&missing).unwrap();
        assert_eq!(config.data_path, PathBuf::from("boundaries.geojson"));
    }
}
