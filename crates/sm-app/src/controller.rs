//! Search handling

use sm_core::{GeoDataStore, PopulationSynthesizer, ViewerError};
use sm_ui::{DisplaySurface, SidebarPresenter};
use sm_views::{BaseMap, MapRenderer};
use tracing::debug;

/// Resolves search queries against the store and updates the map and sidebar
pub struct SearchController {
    synthesizer: PopulationSynthesizer,
}

impl SearchController {
    pub fn new(synthesizer: PopulationSynthesizer) -> Self {
        Self { synthesizer }
    }

    /// Run one search. On success the matched feature is shown and highlighted
    /// and its name returned; on failure the sidebar shows the error message and
    /// the map is left untouched.
    pub fn search<M: BaseMap, S: DisplaySurface>(
        &self,
        raw_query: &str,
        store: &GeoDataStore,
        renderer: &mut MapRenderer<M>,
        sidebar: &mut SidebarPresenter<S>,
    ) -> Result<String, ViewerError> {
        let result = Self::resolve(raw_query, store);
        debug!("Search '{}' -> {:?}", raw_query, result.as_ref().map(|f| f.name()));

        match result {
            Ok(feature) => {
                let population = self.synthesizer.next();
                sidebar.show_detail(feature.name(), population, feature.kind());
                renderer.highlight(feature.name());
                Ok(feature.name().to_string())
            }
            Err(error) => {
                sidebar.show_error(error.user_message());
                Err(error)
            }
        }
    }

    fn resolve<'a>(raw_query: &str, store: &'a GeoDataStore) -> Result<&'a sm_core::Feature, ViewerError> {
        let query = raw_query.trim().to_lowercase();
        if query.is_empty() {
            return Err(ViewerError::EmptyQuery);
        }
        if !store.is_loaded() {
            return Err(ViewerError::DataNotLoaded);
        }
        store
            .find_by_name_substring(&query)
            .ok_or(ViewerError::NotFound { query })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{polygon, MultiPolygon};
    use sm_core::{Feature, FeatureCollection, MapDefaults, PopulationRange};
    use sm_ui::{EguiSurface, PanelContent, Region};
    use sm_views::EguiBaseMap;

    fn setup(names: &[&str]) -> (GeoDataStore, MapRenderer<EguiBaseMap>, SidebarPresenter<EguiSurface>) {
        let mut store = GeoDataStore::new();
        let mut renderer = MapRenderer::new(EguiBaseMap::new(), MapDefaults::default());
        renderer.init();

        if !names.is_empty() {
            let collection: FeatureCollection = names
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let x = i as f64 * 2.0;
                    let shape = polygon![(x: x, y: 0.0), (x: x + 1.0, y: 0.0), (x: x + 1.0, y: 1.0), (x: x, y: 0.0)];
                    Feature::new(*name, None, MultiPolygon(vec![shape]))
                })
                .collect();
            let collection = store.load(collection);
            renderer.draw(collection, |_| {});
        }

        (store, renderer, SidebarPresenter::new(EguiSurface::new()))
    }

    fn controller() -> SearchController {
        SearchController::new(PopulationSynthesizer::new(PopulationRange { min: 1_000, max: 1_000 }))
    }

    #[test]
    fn test_hit_shows_detail_and_highlights() {
        let (store, mut renderer, mut sidebar) = setup(&["Karnataka", "Kerala"]);

        let matched = controller().search("  KERA ", &store, &mut renderer, &mut sidebar).unwrap();

        assert_eq!(matched, "Kerala");
        assert_eq!(renderer.highlighted_name(), Some("Kerala"));
        assert_eq!(
            sidebar.surface().content(Region::Detail),
            Some(&PanelContent::Detail {
                name: "Kerala".to_string(),
                population: "1,000".to_string(),
                kind: "State".to_string(),
            })
        );
    }

    #[test]
    fn test_error_paths() {
        let (store, mut renderer, mut sidebar) = setup(&[]);
        let controller = controller();

        let err = controller.search("   ", &store, &mut renderer, &mut sidebar).unwrap_err();
        assert_eq!(err, ViewerError::EmptyQuery);

        let err = controller.search("goa", &store, &mut renderer, &mut sidebar).unwrap_err();
        assert_eq!(err, ViewerError::DataNotLoaded);
        assert_eq!(
            sidebar.surface().content(Region::Detail),
            Some(&PanelContent::Error("Data not loaded yet. Please try again.".to_string()))
        );

        let (store, mut renderer, mut sidebar) = setup(&["Goa"]);
        let err = controller.search("zzz-no-match", &store, &mut renderer, &mut sidebar).unwrap_err();
        assert_eq!(err, ViewerError::NotFound { query: "zzz-no-match".to_string() });
        assert_eq!(renderer.highlighted_count(), 0);
    }
}
