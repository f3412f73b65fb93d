//! GeoJSON to feature model conversion

use geo_types::{Geometry, MultiPolygon};
use geojson::GeoJson;
use sm_core::{Feature, FeatureCollection, ViewerError};

/// Property holding the feature name
pub const NAME_PROPERTY: &str = "NAME_1";

/// Property holding the administrative type
pub const TYPE_PROPERTY: &str = "TYPE_1";

/// Parse a GeoJSON `FeatureCollection` document.
///
/// Every feature needs a string `NAME_1` property and a Polygon or
/// MultiPolygon geometry; `TYPE_1` is optional.
pub fn parse_feature_collection(source_name: &str, text: &str) -> Result<FeatureCollection, ViewerError> {
    let geojson: GeoJson = text
        .parse()
        .map_err(|e: geojson::Error| ViewerError::parse(source_name, e))?;

    let collection = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        GeoJson::Feature(_) => {
            return Err(ViewerError::parse(source_name, "expected a FeatureCollection, found a Feature"));
        }
        GeoJson::Geometry(_) => {
            return Err(ViewerError::parse(source_name, "expected a FeatureCollection, found a Geometry"));
        }
    };

    collection
        .features
        .into_iter()
        .enumerate()
        .map(|(idx, feature)| convert_feature(source_name, idx, feature))
        .collect::<Result<Vec<_>, _>>()
        .map(FeatureCollection::new)
}

fn convert_feature(source_name: &str, idx: usize, feature: geojson::Feature) -> Result<Feature, ViewerError> {
    let name = feature
        .property(NAME_PROPERTY)
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            ViewerError::parse(source_name, format!("feature {idx} has no string {NAME_PROPERTY} property"))
        })?
        .to_string();

    let kind = feature
        .property(TYPE_PROPERTY)
        .and_then(|v| v.as_str())
        .map(str::to_string);

    let geometry = feature
        .geometry
        .ok_or_else(|| ViewerError::parse(source_name, format!("feature '{name}' has no geometry")))?;

    let geometry: Geometry<f64> = geometry
        .value
        .try_into()
        .map_err(|e: geojson::Error| ViewerError::parse(source_name, format!("feature '{name}': {e}")))?;

    let polygons = match geometry {
        Geometry::Polygon(polygon) => MultiPolygon(vec![polygon]),
        Geometry::MultiPolygon(multi) => multi,
        _ => {
            return Err(ViewerError::parse(
                source_name,
                format!("feature '{name}' is not a Polygon or MultiPolygon"),
            ));
        }
    };

    Ok(Feature::new(name, kind, polygons))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "NAME_1": "Kerala", "TYPE_1": "State" },
                "geometry": { "type": "Polygon", "coordinates": [[[75.0, 8.0], [77.0, 8.0], [77.0, 12.0], [75.0, 8.0]]] }
            },
            {
                "type": "Feature",
                "properties": { "NAME_1": "Lakshadweep", "TYPE_1": "Union Territory" },
                "geometry": { "type": "MultiPolygon", "coordinates": [
                    [[[72.0, 10.0], [72.5, 10.0], [72.5, 10.5], [72.0, 10.0]]],
                    [[[73.0, 11.0], [73.5, 11.0], [73.5, 11.5], [73.0, 11.0]]]
                ] }
            },
            {
                "type": "Feature",
                "properties": { "NAME_1": "Goa" },
                "geometry": { "type": "Polygon", "coordinates": [[[73.7, 15.0], [74.3, 15.0], [74.3, 15.8], [73.7, 15.0]]] }
            }
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let collection = parse_feature_collection("sample", SAMPLE).unwrap();

        assert_eq!(collection.names(), vec!["Kerala", "Lakshadweep", "Goa"]);
        assert_eq!(collection.features()[1].kind(), "Union Territory");
        assert_eq!(collection.features()[1].geometry().0.len(), 2);
        // Missing TYPE_1 falls back to the default kind
        assert_eq!(collection.features()[2].kind(), "State");
    }

    #[test]
    fn test_missing_name_is_parse_error() {
        let text = r#"{ "type": "FeatureCollection", "features": [
            { "type": "Feature", "properties": { "TYPE_1": "State" },
              "geometry": { "type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]] } }
        ] }"#;

        let err = parse_feature_collection("sample", text).unwrap_err();
        assert!(matches!(err, ViewerError::ParseFailed { .. }));
        assert!(err.to_string().contains("NAME_1"));
    }

    #[test]
    fn test_point_geometry_rejected() {
        let text = r#"{ "type": "FeatureCollection", "features": [
            { "type": "Feature", "properties": { "NAME_1": "Delhi" },
              "geometry": { "type": "Point", "coordinates": [77.2, 28.6] } }
        ] }"#;

        assert!(matches!(
            parse_feature_collection("sample", text),
            Err(ViewerError::ParseFailed { .. })
        ));
    }

    #[test]
    fn test_invalid_documents() {
        for text in ["not json at all", r#"{ "type": "Point", "coordinates": [1.0, 2.0] }"#] {
            assert!(matches!(
                parse_feature_collection("sample", text),
                Err(ViewerError::ParseFailed { .. })
            ));
        }
    }

    #[test]
    fn test_empty_collection() {
        let collection = parse_feature_collection("sample", r#"{ "type": "FeatureCollection", "features": [] }"#).unwrap();
        assert!(collection.is_empty());
    }
}
