//! Feature data model

use geo_types::MultiPolygon;
use serde::{Deserialize, Serialize};

/// Kind shown for features whose source data carries no type
pub const DEFAULT_FEATURE_KIND: &str = "State";

/// A geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoord {
    pub lat: f64,
    pub lon: f64,
}

impl GeoCoord {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A named region with boundary geometry
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    name: String,
    kind: String,
    geometry: MultiPolygon<f64>,
}

impl Feature {
    /// Create a feature, falling back to [`DEFAULT_FEATURE_KIND`] when no kind is given
    pub fn new(name: impl Into<String>, kind: Option<String>, geometry: MultiPolygon<f64>) -> Self {
        Self {
            name: name.into(),
            kind: kind.unwrap_or_else(|| DEFAULT_FEATURE_KIND.to_string()),
            geometry,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Administrative type ("State", "Union Territory", ...)
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }
}

/// Ordered set of features produced by one load
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn get(&self, index: usize) -> Option<&Feature> {
        self.features.get(index)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Feature names in collection order
    pub fn names(&self) -> Vec<&str> {
        self.features.iter().map(Feature::name).collect()
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
