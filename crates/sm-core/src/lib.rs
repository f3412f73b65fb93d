//! Core functionality for the state map viewer
//!
//! This crate provides the data model, the in-memory feature store and the
//! small pieces of logic (population synthesis, random sampling) shared by
//! the map and sidebar layers.

pub mod config;
pub mod error;
pub mod model;
pub mod population;
pub mod sampler;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigError, MapDefaults, PopulationRange, ViewerConfig};
pub use error::ViewerError;
pub use model::{Feature, FeatureCollection, GeoCoord, DEFAULT_FEATURE_KIND};
pub use population::{format_population, PopulationSynthesizer};
pub use sampler::RandomSampler;
pub use store::GeoDataStore;
