//! Base map capability
//!
//! The renderer never projects or rasterizes geometry itself. It talks to
//! whatever implements [`BaseMap`]: the egui map in this crate, or a test double.

use egui::Color32;
use geo_types::MultiPolygon;
use sm_core::GeoCoord;

/// Opaque handle for a layer drawn on a base map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerHandle(pub u64);

/// Visual style of a polygon layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonStyle {
    pub stroke_color: Color32,
    pub stroke_weight: f32,
    pub fill_color: Color32,
    pub fill_opacity: f32,
}

impl PolygonStyle {
    /// Style every feature is drawn with
    pub const DEFAULT: PolygonStyle = PolygonStyle {
        stroke_color: Color32::from_rgb(0x0d, 0x6e, 0xfd),
        stroke_weight: 1.0,
        fill_color: Color32::from_rgb(0x0d, 0x6e, 0xfd),
        fill_opacity: 0.2,
    };

    /// Style of the selected feature
    pub const HIGHLIGHT: PolygonStyle = PolygonStyle {
        stroke_color: Color32::from_rgb(0xdc, 0x35, 0x45),
        stroke_weight: 2.0,
        fill_color: Color32::from_rgb(0xdc, 0x35, 0x45),
        fill_opacity: 0.6,
    };

    /// Fill opacity while the pointer is over a feature
    pub const HOVER_FILL_OPACITY: f32 = 0.5;

    pub fn with_fill_opacity(mut self, fill_opacity: f32) -> Self {
        self.fill_opacity = fill_opacity;
        self
    }

    /// Fill color with the opacity applied
    pub fn fill(&self) -> Color32 {
        self.fill_color.linear_multiply(self.fill_opacity)
    }
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Raster tile backdrop description
#[derive(Debug, Clone, PartialEq)]
pub struct TileBackdrop {
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: f64,
}

/// Pointer interaction reported by the base map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapEventKind {
    PointerEnter,
    PointerLeave,
    Click,
}

/// Interaction with one layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapEvent {
    pub handle: LayerHandle,
    pub kind: MapEventKind,
}

impl MapEvent {
    pub fn new(handle: LayerHandle, kind: MapEventKind) -> Self {
        Self { handle, kind }
    }
}

/// Map surface capable of showing tiles and styled polygon overlays.
///
/// Events are only reported for layers whose handlers were bound.
pub trait BaseMap {
    /// Set up the view at a center and zoom level
    fn create_view(&mut self, center: GeoCoord, zoom: f64);

    /// Attach the tile backdrop
    fn add_tile_backdrop(&mut self, backdrop: TileBackdrop);

    /// Draw a polygon overlay
    fn draw_polygon_layer(&mut self, geometry: &MultiPolygon<f64>, style: PolygonStyle) -> LayerHandle;

    /// Remove an overlay. Unknown handles are ignored.
    fn remove_layer(&mut self, handle: LayerHandle);

    /// Restyle an overlay
    fn set_layer_style(&mut self, handle: LayerHandle, style: PolygonStyle);

    /// Move the viewport so the union of the given layers is visible
    fn fit_view_to_bounds(&mut self, handles: &[LayerHandle]);

    /// Report clicks on this layer
    fn bind_click_handler(&mut self, handle: LayerHandle);

    /// Report pointer enter/leave on this layer
    fn bind_hover_handlers(&mut self, handle: LayerHandle);

    /// Attach popup text shown when the layer is clicked or the popup is opened
    fn bind_popup(&mut self, handle: LayerHandle, content: &str);

    /// Open the layer's popup, closing any other
    fn open_popup(&mut self, handle: LayerHandle);

    /// Take the events collected since the last call
    fn drain_events(&mut self) -> Vec<MapEvent>;
}
