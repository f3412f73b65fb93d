//! egui implementation of the base map
//!
//! Draws polygon overlays over a graticule backdrop with Web Mercator
//! projection, pans on drag, zooms on scroll and reports pointer events per
//! layer. Raster tiles are not downloaded; the backdrop only carries the
//! attribution of the configured tile source.

use std::collections::BTreeMap;
use egui::{Align2, Color32, CursorIcon, FontId, Mesh, Pos2, Rect, Rounding, Sense, Shape, Stroke, Ui, Vec2};
use geo::{BoundingRect, Contains, TriangulateEarcut};
use geo_types::{Coord, LineString, MultiPolygon, Point};
use sm_core::GeoCoord;
use tracing::debug;

use crate::base_map::{BaseMap, LayerHandle, MapEvent, MapEventKind, PolygonStyle, TileBackdrop};
use crate::projection::{bounds_center, fit_zoom, project, unproject, union_bounds};

const MIN_ZOOM: f64 = 1.0;
const FIT_PADDING: f64 = 20.0;
/// Scroll distance for one zoom level
const SCROLL_PER_ZOOM: f32 = 120.0;
/// Viewport assumed before the first frame is laid out
const DEFAULT_VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

const BACKGROUND: Color32 = Color32::from_rgb(230, 240, 250);
const GRID_COLOR: Color32 = Color32::from_gray(200);
const LABEL_COLOR: Color32 = Color32::from_gray(100);

struct MapLayer {
    geometry: MultiPolygon<f64>,
    /// Fill triangles in lon/lat
    triangles: Vec<[Coord<f64>; 3]>,
    bounds: Option<geo_types::Rect<f64>>,
    style: PolygonStyle,
    popup: Option<String>,
    clickable: bool,
    hoverable: bool,
}

impl MapLayer {
    fn new(geometry: &MultiPolygon<f64>, style: PolygonStyle) -> Self {
        let triangles = geometry
            .0
            .iter()
            .flat_map(|polygon| polygon.earcut_triangles_iter())
            .map(|t| [t.v1(), t.v2(), t.v3()])
            .collect();

        Self {
            geometry: geometry.clone(),
            triangles,
            bounds: geometry.bounding_rect(),
            style,
            popup: None,
            clickable: false,
            hoverable: false,
        }
    }

    fn contains(&self, coord: GeoCoord) -> bool {
        let point = Point::new(coord.lon, coord.lat);
        let in_bounds = self.bounds.map_or(false, |b| b.contains(&point));
        in_bounds && self.geometry.contains(&point)
    }
}

/// Interactive map widget backed by egui's painter
pub struct EguiBaseMap {
    center: GeoCoord,
    zoom: f64,
    view_created: bool,
    backdrop: Option<TileBackdrop>,

    /// Layers in draw order (handles are never reused)
    layers: BTreeMap<LayerHandle, MapLayer>,
    next_handle: u64,

    open_popup: Option<LayerHandle>,
    hovered: Option<LayerHandle>,
    viewport_size: Vec2,
    events: Vec<MapEvent>,
}

impl Default for EguiBaseMap {
    fn default() -> Self {
        Self::new()
    }
}

impl EguiBaseMap {
    pub fn new() -> Self {
        Self {
            center: GeoCoord::new(0.0, 0.0),
            zoom: MIN_ZOOM,
            view_created: false,
            backdrop: None,
            layers: BTreeMap::new(),
            next_handle: 0,
            open_popup: None,
            hovered: None,
            viewport_size: DEFAULT_VIEWPORT,
            events: Vec::new(),
        }
    }

    pub fn center(&self) -> GeoCoord {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn backdrop(&self) -> Option<&TileBackdrop> {
        self.backdrop.as_ref()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer_style(&self, handle: LayerHandle) -> Option<PolygonStyle> {
        self.layers.get(&handle).map(|l| l.style)
    }

    /// Layer whose popup is currently open
    pub fn open_popup_layer(&self) -> Option<LayerHandle> {
        self.open_popup
    }

    fn max_zoom(&self) -> f64 {
        self.backdrop.as_ref().map_or(18.0, |b| b.max_zoom)
    }

    fn to_screen(&self, coord: GeoCoord, rect: Rect) -> Pos2 {
        let center = project(self.center, self.zoom);
        let p = project(coord, self.zoom);
        rect.center() + Vec2::new((p.x - center.x) as f32, (p.y - center.y) as f32)
    }

    fn lon_lat_to_screen(&self, coord: Coord<f64>, rect: Rect) -> Pos2 {
        self.to_screen(GeoCoord::new(coord.y, coord.x), rect)
    }

    fn to_geo(&self, pos: Pos2, rect: Rect) -> GeoCoord {
        let center = project(self.center, self.zoom);
        let offset = pos - rect.center();
        unproject(
            Coord {
                x: center.x + offset.x as f64,
                y: center.y + offset.y as f64,
            },
            self.zoom,
        )
    }

    /// Topmost layer under a screen position
    fn hit_test(&self, pos: Pos2, rect: Rect) -> Option<LayerHandle> {
        let coord = self.to_geo(pos, rect);
        self.layers
            .iter()
            .rev()
            .find(|(_, layer)| layer.contains(coord))
            .map(|(handle, _)| *handle)
    }

    /// Show the map, filling the available space
    pub fn ui(&mut self, ui: &mut Ui) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        self.viewport_size = rect.size();

        if !self.view_created {
            ui.painter_at(rect).text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Map not initialized",
                FontId::proportional(14.0),
                LABEL_COLOR,
            );
            return response;
        }

        self.handle_navigation(ui, &response);
        self.handle_pointer(ui, &response, rect);

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, Rounding::ZERO, BACKGROUND);
        self.draw_graticule(&painter, rect);
        self.draw_layers(&painter, rect);
        self.draw_popup(&painter, rect);
        self.draw_attribution(&painter, rect);

        response
    }

    fn handle_navigation(&mut self, ui: &Ui, response: &egui::Response) {
        // Pan
        if response.dragged() {
            let delta = response.drag_delta();
            let center = project(self.center, self.zoom);
            self.center = unproject(
                Coord {
                    x: center.x - delta.x as f64,
                    y: center.y - delta.y as f64,
                },
                self.zoom,
            );
        }

        // Zoom
        if response.hovered() {
            let scroll_delta = ui.input(|i| i.scroll_delta.y);
            if scroll_delta != 0.0 {
                self.zoom = (self.zoom + (scroll_delta / SCROLL_PER_ZOOM) as f64).clamp(MIN_ZOOM, self.max_zoom());
            }
        }
    }

    fn handle_pointer(&mut self, ui: &Ui, response: &egui::Response, rect: Rect) {
        let hovered = response
            .hover_pos()
            .and_then(|pos| self.hit_test(pos, rect))
            .filter(|handle| self.layers.get(handle).map_or(false, |l| l.hoverable));

        if hovered != self.hovered {
            if let Some(previous) = self.hovered {
                self.events.push(MapEvent::new(previous, MapEventKind::PointerLeave));
            }
            if let Some(current) = hovered {
                self.events.push(MapEvent::new(current, MapEventKind::PointerEnter));
            }
            self.hovered = hovered;
        }

        if self.hovered.is_some() {
            ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
        }

        if response.clicked() {
            let clicked = response
                .interact_pointer_pos()
                .and_then(|pos| self.hit_test(pos, rect));

            let target = clicked.and_then(|handle| {
                let layer = self.layers.get(&handle)?;
                layer.clickable.then_some((handle, layer.popup.is_some()))
            });

            match target {
                Some((handle, has_popup)) => {
                    if has_popup {
                        self.open_popup = Some(handle);
                    }
                    self.events.push(MapEvent::new(handle, MapEventKind::Click));
                }
                None => self.open_popup = None,
            }
        }
    }

    fn draw_graticule(&self, painter: &egui::Painter, rect: Rect) {
        // Pick the finest step that keeps lines at least 60px apart
        let degrees_per_px = 360.0 / (256.0 * 2f64.powf(self.zoom));
        let step = [30.0, 10.0, 5.0, 2.0, 1.0, 0.5, 0.25, 0.1]
            .into_iter()
            .filter(|step| step / degrees_per_px >= 60.0)
            .last()
            .unwrap_or(30.0);

        let top_left = self.to_geo(rect.left_top(), rect);
        let bottom_right = self.to_geo(rect.right_bottom(), rect);
        let stroke = Stroke::new(0.5, GRID_COLOR);

        let mut lon = (top_left.lon / step).floor() * step;
        while lon <= bottom_right.lon {
            let x = self.to_screen(GeoCoord::new(self.center.lat, lon), rect).x;
            painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
            painter.text(
                Pos2::new(x + 2.0, rect.bottom() - 2.0),
                Align2::LEFT_BOTTOM,
                format!("{lon:.1}°"),
                FontId::proportional(10.0),
                LABEL_COLOR,
            );
            lon += step;
        }

        let mut lat = (bottom_right.lat / step).floor() * step;
        while lat <= top_left.lat {
            let y = self.to_screen(GeoCoord::new(lat, self.center.lon), rect).y;
            painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
            painter.text(
                Pos2::new(rect.left() + 5.0, y - 2.0),
                Align2::LEFT_BOTTOM,
                format!("{lat:.1}°"),
                FontId::proportional(10.0),
                LABEL_COLOR,
            );
            lat += step;
        }
    }

    fn draw_layers(&self, painter: &egui::Painter, rect: Rect) {
        for layer in self.layers.values() {
            let fill = layer.style.fill();
            let mut mesh = Mesh::default();
            for triangle in &layer.triangles {
                let base = mesh.vertices.len() as u32;
                for coord in triangle {
                    mesh.colored_vertex(self.lon_lat_to_screen(*coord, rect), fill);
                }
                mesh.add_triangle(base, base + 1, base + 2);
            }
            painter.add(Shape::mesh(mesh));

            let stroke = Stroke::new(layer.style.stroke_weight, layer.style.stroke_color);
            for polygon in &layer.geometry.0 {
                for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
                    painter.add(Shape::closed_line(self.ring_to_screen(ring, rect), stroke));
                }
            }
        }
    }

    fn ring_to_screen(&self, ring: &LineString<f64>, rect: Rect) -> Vec<Pos2> {
        let mut points: Vec<Pos2> = ring.0.iter().map(|c| self.lon_lat_to_screen(*c, rect)).collect();
        // Rings repeat the first point at the end
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        points
    }

    fn draw_popup(&self, painter: &egui::Painter, rect: Rect) {
        let Some((content, bounds)) = self
            .open_popup
            .and_then(|h| self.layers.get(&h))
            .and_then(|l| Some((l.popup.as_ref()?, l.bounds?)))
        else {
            return;
        };

        let anchor = self.to_screen(bounds_center(bounds), rect);
        let galley = painter.layout_no_wrap(content.clone(), FontId::proportional(14.0), Color32::BLACK);
        let size = galley.size() + Vec2::splat(16.0);
        let popup_rect = Rect::from_min_size(anchor - Vec2::new(size.x / 2.0, size.y + 10.0), size);

        painter.rect(popup_rect, Rounding::same(6.0), Color32::WHITE, Stroke::new(1.0, Color32::from_gray(160)));
        painter.galley(popup_rect.min + Vec2::splat(8.0), galley);
        painter.circle_filled(anchor, 3.0, Color32::from_gray(60));
    }

    fn draw_attribution(&self, painter: &egui::Painter, rect: Rect) {
        if let Some(backdrop) = &self.backdrop {
            painter.text(
                rect.right_bottom() - Vec2::new(4.0, 4.0),
                Align2::RIGHT_BOTTOM,
                &backdrop.attribution,
                FontId::proportional(10.0),
                LABEL_COLOR,
            );
        }
    }
}

impl BaseMap for EguiBaseMap {
    fn create_view(&mut self, center: GeoCoord, zoom: f64) {
        self.center = center;
        self.zoom = zoom;
        self.view_created = true;
    }

    fn add_tile_backdrop(&mut self, backdrop: TileBackdrop) {
        debug!("Tile backdrop {} (max zoom {})", backdrop.url_template, backdrop.max_zoom);
        self.zoom = self.zoom.min(backdrop.max_zoom);
        self.backdrop = Some(backdrop);
    }

    fn draw_polygon_layer(&mut self, geometry: &MultiPolygon<f64>, style: PolygonStyle) -> LayerHandle {
        self.next_handle += 1;
        let handle = LayerHandle(self.next_handle);
        self.layers.insert(handle, MapLayer::new(geometry, style));
        handle
    }

    fn remove_layer(&mut self, handle: LayerHandle) {
        self.layers.remove(&handle);
        if self.open_popup == Some(handle) {
            self.open_popup = None;
        }
        if self.hovered == Some(handle) {
            self.hovered = None;
        }
    }

    fn set_layer_style(&mut self, handle: LayerHandle, style: PolygonStyle) {
        if let Some(layer) = self.layers.get_mut(&handle) {
            layer.style = style;
        }
    }

    fn fit_view_to_bounds(&mut self, handles: &[LayerHandle]) {
        let bounds = union_bounds(
            handles
                .iter()
                .filter_map(|h| self.layers.get(h))
                .filter_map(|l| l.bounds),
        );
        let Some(bounds) = bounds else {
            return;
        };

        self.zoom = fit_zoom(
            bounds,
            [self.viewport_size.x as f64, self.viewport_size.y as f64],
            FIT_PADDING,
            MIN_ZOOM,
            self.max_zoom(),
        );
        self.center = bounds_center(bounds);
    }

    fn bind_click_handler(&mut self, handle: LayerHandle) {
        if let Some(layer) = self.layers.get_mut(&handle) {
            layer.clickable = true;
        }
    }

    fn bind_hover_handlers(&mut self, handle: LayerHandle) {
        if let Some(layer) = self.layers.get_mut(&handle) {
            layer.hoverable = true;
        }
    }

    fn bind_popup(&mut self, handle: LayerHandle, content: &str) {
        if let Some(layer) = self.layers.get_mut(&handle) {
            layer.popup = Some(content.to_string());
        }
    }

    fn open_popup(&mut self, handle: LayerHandle) {
        if self.layers.get(&handle).map_or(false, |l| l.popup.is_some()) {
            self.open_popup = Some(handle);
        }
    }

    fn drain_events(&mut self) -> Vec<MapEvent> {
        std::mem::take(&mut self.events)
    }
}
