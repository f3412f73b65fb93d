//! The viewer: one store, one map, one sidebar

use std::sync::mpsc::{channel, Receiver, Sender};

use sm_core::{FeatureCollection, GeoDataStore, PopulationSynthesizer, RandomSampler, ViewerConfig, ViewerError};
use sm_data::FeatureSource;
use sm_ui::{DisplaySurface, SidebarPresenter};
use sm_views::{BaseMap, MapRenderer};
use tracing::{error, info};

use crate::controller::SearchController;

/// Message shown when the feature data cannot be loaded
pub const LOAD_FAILED_ALERT: &str = "Failed to load map data. Please check the log for details.";

/// Feature picked by clicking on the map
#[derive(Debug, Clone, PartialEq, Eq)]
struct FeatureClick {
    name: String,
    kind: String,
}

/// Wires the data store, map renderer and sidebar together.
///
/// Map clicks arrive through the renderer's click callback, which only queues
/// them; [`Viewer::pump_map_events`] turns queued clicks into detail views.
pub struct Viewer<M: BaseMap, S: DisplaySurface> {
    config: ViewerConfig,
    store: GeoDataStore,
    renderer: MapRenderer<M>,
    sidebar: SidebarPresenter<S>,
    controller: SearchController,
    synthesizer: PopulationSynthesizer,

    clicks_tx: Sender<FeatureClick>,
    clicks_rx: Receiver<FeatureClick>,
}

impl<M: BaseMap, S: DisplaySurface> Viewer<M, S> {
    /// Create the map view and show the loading indicator
    pub fn new(config: ViewerConfig, base_map: M, surface: S) -> Self {
        let mut renderer = MapRenderer::new(base_map, config.map.clone());
        renderer.init();

        let mut sidebar = SidebarPresenter::new(surface);
        sidebar.show_loading();

        let synthesizer = PopulationSynthesizer::new(config.population);
        let (clicks_tx, clicks_rx) = channel();

        Self {
            controller: SearchController::new(synthesizer),
            config,
            store: GeoDataStore::new(),
            renderer,
            sidebar,
            synthesizer,
            clicks_tx,
            clicks_rx,
        }
    }

    /// Fetch from `source` and apply the result
    pub async fn load(&mut self, source: &dyn FeatureSource) -> Result<usize, ViewerError> {
        info!("Loading features from {}", source.source_name());
        let result = source.fetch().await;
        self.finish_load(result)
    }

    /// Apply the outcome of a fetch. On success the features are stored, drawn
    /// and summarised; on failure the user is alerted and the map keeps its
    /// last successful state.
    pub fn finish_load(&mut self, result: Result<FeatureCollection, ViewerError>) -> Result<usize, ViewerError> {
        self.sidebar.hide_loading();

        let collection = match result {
            Ok(collection) => collection,
            Err(e) => {
                error!("Error loading GeoJSON: {}", e);
                self.sidebar.alert(LOAD_FAILED_ALERT);
                return Err(e);
            }
        };

        let collection = self.store.load(collection);
        let total = collection.len();

        let clicks = self.clicks_tx.clone();
        self.renderer.draw(collection.clone(), move |feature| {
            let _ = clicks.send(FeatureClick {
                name: feature.name().to_string(),
                kind: feature.kind().to_string(),
            });
        });

        self.sidebar.show_summary(total);

        let names: Vec<String> = collection.names().into_iter().map(str::to_string).collect();
        let sample: Vec<(String, u64)> = RandomSampler::sample(&names, self.config.sample_size)
            .into_iter()
            .map(|name| (name, self.synthesizer.next()))
            .collect();
        self.sidebar.show_random_sample(&sample);

        info!("Viewer ready with {} features", total);
        Ok(total)
    }

    /// Search by case-insensitive name substring
    pub fn search(&mut self, query: &str) -> Result<String, ViewerError> {
        self.controller
            .search(query, &self.store, &mut self.renderer, &mut self.sidebar)
    }

    /// Restore the initial map view
    pub fn reset_view(&mut self) {
        self.renderer.reset_view();
    }

    /// Dispatch pending map events and show details for any clicked feature.
    /// Returns the number of map events handled.
    pub fn pump_map_events(&mut self) -> usize {
        let handled = self.renderer.dispatch_events();
        self.show_clicked();
        handled
    }

    fn show_clicked(&mut self) {
        while let Ok(click) = self.clicks_rx.try_recv() {
            let population = self.synthesizer.next();
            self.sidebar.show_detail(&click.name, population, &click.kind);
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn store(&self) -> &GeoDataStore {
        &self.store
    }

    pub fn renderer(&self) -> &MapRenderer<M> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut MapRenderer<M> {
        &mut self.renderer
    }

    pub fn sidebar(&self) -> &SidebarPresenter<S> {
        &self.sidebar
    }

    pub fn sidebar_mut(&mut self) -> &mut SidebarPresenter<S> {
        &mut self.sidebar
    }
}
