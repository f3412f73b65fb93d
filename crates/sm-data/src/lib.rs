//! Feature data sources for the state map viewer

pub mod parse;
pub mod sources;

use async_trait::async_trait;
use sm_core::{FeatureCollection, ViewerError};

// Re-exports
pub use parse::{parse_feature_collection, NAME_PROPERTY, TYPE_PROPERTY};
pub use sources::GeoJsonFileSource;

/// Trait for feature sources
#[async_trait]
pub trait FeatureSource: Send + Sync {
    /// Fetch and parse the whole collection.
    ///
    /// Transport problems surface as `FetchFailed`, malformed content as `ParseFailed`.
    async fn fetch(&self) -> Result<FeatureCollection, ViewerError>;

    /// Get the source name/path
    fn source_name(&self) -> &str;
}
