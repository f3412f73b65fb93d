//! In-memory feature store

use std::sync::Arc;
use tracing::debug;

use crate::model::{Feature, FeatureCollection};

/// Holds the most recently loaded feature collection
#[derive(Debug, Default)]
pub struct GeoDataStore {
    collection: Option<Arc<FeatureCollection>>,
}

impl GeoDataStore {
    /// Create an empty (unloaded) store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held collection. Layers drawn from the previous one must be redrawn.
    pub fn load(&mut self, collection: FeatureCollection) -> Arc<FeatureCollection> {
        let collection = Arc::new(collection);
        debug!("Feature store now holds {} features", collection.len());
        self.collection = Some(collection.clone());
        collection
    }

    pub fn is_loaded(&self) -> bool {
        self.collection.is_some()
    }

    /// Shared handle to the held collection
    pub fn collection(&self) -> Option<Arc<FeatureCollection>> {
        self.collection.clone()
    }

    pub fn count(&self) -> usize {
        self.collection.as_ref().map_or(0, |c| c.len())
    }

    /// First feature, in collection order, whose name contains `query` ignoring case.
    ///
    /// Returns `None` when nothing is loaded or nothing matches.
    pub fn find_by_name_substring(&self, query: &str) -> Option<&Feature> {
        let needle = query.to_lowercase();
        self.collection
            .as_ref()?
            .features()
            .iter()
            .find(|feature| feature.name().to_lowercase().contains(&needle))
    }
}
