use std::path::{Path, PathBuf};
use async_trait::async_trait;
use sm_core::{FeatureCollection, ViewerError};
use tracing::{debug, info};

use crate::parse::parse_feature_collection;
use crate::FeatureSource;

/// GeoJSON file on local disk, read once per fetch
pub struct GeoJsonFileSource {
    /// Path to the GeoJSON file
    path: PathBuf,
    /// Display name used in diagnostics
    name: String,
}

impl GeoJsonFileSource {
    /// Create a new source for a file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.geojson")
            .to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FeatureSource for GeoJsonFileSource {
    async fn fetch(&self) -> Result<FeatureCollection, ViewerError> {
        debug!("Reading GeoJSON from {:?}", self.path());

        let bytes = tokio::fs::read(self.path())
            .await
            .map_err(|e| ViewerError::fetch(&self.name, e))?;
        let text = String::from_utf8(bytes).map_err(|e| ViewerError::parse(&self.name, e))?;

        // Parsing large boundary files is CPU bound
        let name = self.name.clone();
        let collection = tokio::task::spawn_blocking(move || parse_feature_collection(&name, &text))
            .await
            .map_err(|e| ViewerError::fetch(&self.name, e))??;

        info!("Loaded {} features from {}", collection.len(), self.name);
        Ok(collection)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TWO_STATES: &str = r#"{ "type": "FeatureCollection", "features": [
        { "type": "Feature", "properties": { "NAME_1": "Punjab", "TYPE_1": "State" },
          "geometry": { "type": "Polygon", "coordinates": [[[74.0, 30.0], [76.0, 30.0], [76.0, 32.0], [74.0, 30.0]]] } },
        { "type": "Feature", "properties": { "NAME_1": "Chandigarh", "TYPE_1": "Union Territory" },
          "geometry": { "type": "Polygon", "coordinates": [[[76.7, 30.7], [76.8, 30.7], [76.8, 30.8], [76.7, 30.7]]] } }
    ] }"#;

    fn write_fixture(contents: &[u8]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("india-states.geojson");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        (dir, path)
    }

    #[tokio::test]
    async fn test_fetch_valid_file() {
        let (_dir, path) = write_fixture(TWO_STATES.as_bytes());
        let source = GeoJsonFileSource::new(&path);

        assert_eq!(source.source_name(), "india-states.geojson");
        assert_eq!(source.path(), path.as_path());
        let collection = source.fetch().await.unwrap();
        assert_eq!(collection.names(), vec!["Punjab", "Chandigarh"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_fetch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let source = GeoJsonFileSource::new(dir.path().join("absent.geojson"));

        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, ViewerError::FetchFailed { .. }));
    }

    #[tokio::test]
    async fn test_garbage_is_parse_failure() {
        let (_dir, path) = write_fixture(b"<html>404</html>");
        let err = GeoJsonFileSource::new(&path).fetch().await.unwrap_err();
        assert!(matches!(err, ViewerError::ParseFailed { .. }));

        let (_dir, path) = write_fixture(&[0xff, 0xfe, 0x00]);
        let err = GeoJsonFileSource::new(&path).fetch().await.unwrap_err();
        assert!(matches!(err, ViewerError::ParseFailed { .. }));
    }
}
