//! Feature layer rendering on top of a base map

use std::sync::Arc;
use ahash::AHashMap;
use sm_core::{Feature, FeatureCollection, MapDefaults};
use tracing::{debug, info, warn};

use crate::base_map::{BaseMap, LayerHandle, MapEvent, MapEventKind, PolygonStyle, TileBackdrop};

/// Callback invoked with the feature under a click
pub type FeatureClickHandler = Box<dyn FnMut(&Feature)>;

/// On-map representation of one feature
#[derive(Debug, Clone)]
struct RenderedLayer {
    handle: LayerHandle,
    feature_index: usize,
    highlighted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RendererState {
    Uninitialized,
    Ready,
}

/// Draws feature collections as polygon layers and tracks hover/highlight state
pub struct MapRenderer<M: BaseMap> {
    base_map: M,
    defaults: MapDefaults,
    state: RendererState,

    /// Collection the current layers were drawn from
    collection: Option<Arc<FeatureCollection>>,
    layers: Vec<RenderedLayer>,

    // Layer lookups
    by_handle: AHashMap<LayerHandle, usize>,
    by_name: AHashMap<String, usize>,

    on_click: Option<FeatureClickHandler>,
}

impl<M: BaseMap> MapRenderer<M> {
    pub fn new(base_map: M, defaults: MapDefaults) -> Self {
        Self {
            base_map,
            defaults,
            state: RendererState::Uninitialized,
            collection: None,
            layers: Vec::new(),
            by_handle: AHashMap::new(),
            by_name: AHashMap::new(),
            on_click: None,
        }
    }

    /// Create the base view and attach the tile backdrop. Only the first call has an effect.
    pub fn init(&mut self) {
        if self.state == RendererState::Ready {
            warn!("Map renderer already initialized, ignoring init");
            return;
        }

        self.base_map.create_view(self.defaults.center, self.defaults.zoom);
        self.base_map.add_tile_backdrop(TileBackdrop {
            url_template: self.defaults.tile_url_template.clone(),
            attribution: self.defaults.attribution.clone(),
            max_zoom: self.defaults.max_zoom,
        });
        self.state = RendererState::Ready;
        debug!(
            "Base map created at ({}, {}) zoom {}",
            self.defaults.center.lat, self.defaults.center.lon, self.defaults.zoom
        );
    }

    pub fn is_initialized(&self) -> bool {
        self.state == RendererState::Ready
    }

    /// Replace all drawn layers with one layer per feature and fit the view to them
    pub fn draw(&mut self, collection: Arc<FeatureCollection>, on_click: impl FnMut(&Feature) + 'static) {
        if self.state != RendererState::Ready {
            warn!("Map renderer drawn before init, ignoring draw");
            return;
        }

        self.clear_layers();

        for (feature_index, feature) in collection.features().iter().enumerate() {
            let handle = self.base_map.draw_polygon_layer(feature.geometry(), PolygonStyle::DEFAULT);
            self.base_map.bind_popup(handle, feature.name());
            self.base_map.bind_hover_handlers(handle);
            self.base_map.bind_click_handler(handle);

            let layer_index = self.layers.len();
            self.layers.push(RenderedLayer {
                handle,
                feature_index,
                highlighted: false,
            });
            self.by_handle.insert(handle, layer_index);
            // Duplicate names: the first layer keeps the name
            self.by_name.entry(feature.name().to_string()).or_insert(layer_index);
        }

        self.collection = Some(collection);
        self.on_click = Some(Box::new(on_click));
        self.reset_view();

        info!("Drew {} feature layers", self.layers.len());
    }

    /// Fit the viewport to every drawn layer
    pub fn reset_view(&mut self) {
        if self.layers.is_empty() {
            return;
        }
        let handles: Vec<LayerHandle> = self.layers.iter().map(|l| l.handle).collect();
        self.base_map.fit_view_to_bounds(&handles);
    }

    /// Select the feature named exactly `name`: restyle it, zoom to it and open its popup.
    ///
    /// All other layers lose their highlight first. Returns false when no layer has that name.
    pub fn highlight(&mut self, name: &str) -> bool {
        self.clear_highlight();

        let Some(&layer_index) = self.by_name.get(name) else {
            debug!("No layer named '{}' to highlight", name);
            return false;
        };

        let layer = &mut self.layers[layer_index];
        layer.highlighted = true;
        let handle = layer.handle;

        self.base_map.set_layer_style(handle, PolygonStyle::HIGHLIGHT);
        self.base_map.fit_view_to_bounds(&[handle]);
        self.base_map.open_popup(handle);

        debug!("Highlighted '{}'", name);
        true
    }

    fn clear_highlight(&mut self) {
        for layer in &mut self.layers {
            layer.highlighted = false;
            self.base_map.set_layer_style(layer.handle, PolygonStyle::DEFAULT);
        }
    }

    fn clear_layers(&mut self) {
        for layer in self.layers.drain(..) {
            self.base_map.remove_layer(layer.handle);
        }
        self.by_handle.clear();
        self.by_name.clear();
        self.collection = None;
        self.on_click = None;
    }

    /// Route one base map event to the layer it concerns
    pub fn handle_event(&mut self, event: MapEvent) {
        let Some(&layer_index) = self.by_handle.get(&event.handle) else {
            // Stale event for a layer from a previous draw
            return;
        };
        let layer = &self.layers[layer_index];

        match event.kind {
            MapEventKind::PointerEnter => {
                let style = if layer.highlighted {
                    PolygonStyle::HIGHLIGHT
                } else {
                    PolygonStyle::DEFAULT.with_fill_opacity(PolygonStyle::HOVER_FILL_OPACITY)
                };
                self.base_map.set_layer_style(layer.handle, style);
            }
            MapEventKind::PointerLeave => {
                if !layer.highlighted {
                    self.base_map.set_layer_style(layer.handle, PolygonStyle::DEFAULT);
                }
            }
            MapEventKind::Click => {
                let feature_index = layer.feature_index;
                if let (Some(collection), Some(on_click)) = (self.collection.as_ref(), self.on_click.as_mut()) {
                    if let Some(feature) = collection.get(feature_index) {
                        on_click(feature);
                    }
                }
            }
        }
    }

    /// Drain pending base map events and dispatch them. Returns how many were handled.
    pub fn dispatch_events(&mut self) -> usize {
        let events = self.base_map.drain_events();
        let count = events.len();
        for event in events {
            self.handle_event(event);
        }
        count
    }

    /// Name of the highlighted feature, if any
    pub fn highlighted_name(&self) -> Option<&str> {
        let collection = self.collection.as_ref()?;
        self.layers
            .iter()
            .find(|l| l.highlighted)
            .and_then(|l| collection.get(l.feature_index))
            .map(Feature::name)
    }

    pub fn highlighted_count(&self) -> usize {
        self.layers.iter().filter(|l| l.highlighted).count()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Handle of the layer drawn for the feature named `name`
    pub fn layer_handle(&self, name: &str) -> Option<LayerHandle> {
        self.by_name.get(name).map(|&i| self.layers[i].handle)
    }

    pub fn base_map(&self) -> &M {
        &self.base_map
    }

    pub fn base_map_mut(&mut self) -> &mut M {
        &mut self.base_map
    }
}
