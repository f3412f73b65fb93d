//! Web Mercator helpers for the egui base map
//!
//! World coordinates are pixels on a `256 * 2^zoom` square, origin top-left,
//! the same space slippy-map tiles are addressed in.

use geo_types::{Coord, Rect};
use sm_core::GeoCoord;

/// Edge length of one tile in pixels
pub const TILE_SIZE: f64 = 256.0;

/// Latitude where the Mercator square ends
pub const MAX_LATITUDE: f64 = 85.051_128_78;

fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2f64.powf(zoom)
}

/// Geographic coordinate to world pixels at `zoom`
pub fn project(coord: GeoCoord, zoom: f64) -> Coord<f64> {
    let size = world_size(zoom);
    let lat = coord.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();

    let x = (coord.lon + 180.0) / 360.0 * size;
    let y = (1.0 - lat.tan().asinh() / std::f64::consts::PI) / 2.0 * size;
    Coord { x, y }
}

/// World pixels at `zoom` back to a geographic coordinate
pub fn unproject(point: Coord<f64>, zoom: f64) -> GeoCoord {
    let size = world_size(zoom);
    let lon = point.x / size * 360.0 - 180.0;
    let n = std::f64::consts::PI * (1.0 - 2.0 * point.y / size);
    GeoCoord::new(n.sinh().atan().to_degrees(), lon)
}

/// Project a `(lon, lat)` geometry coordinate
pub fn project_lon_lat(coord: Coord<f64>, zoom: f64) -> Coord<f64> {
    project(GeoCoord::new(coord.y, coord.x), zoom)
}

/// Center of a lon/lat bounding box, measured in projected space
pub fn bounds_center(bounds: Rect<f64>) -> GeoCoord {
    let min = project_lon_lat(bounds.min(), 0.0);
    let max = project_lon_lat(bounds.max(), 0.0);
    unproject(Coord { x: (min.x + max.x) / 2.0, y: (min.y + max.y) / 2.0 }, 0.0)
}

/// Largest whole zoom level at which `bounds` fits inside `viewport` minus `padding` on each side
pub fn fit_zoom(bounds: Rect<f64>, viewport: [f64; 2], padding: f64, min_zoom: f64, max_zoom: f64) -> f64 {
    let min = project_lon_lat(bounds.min(), 0.0);
    let max = project_lon_lat(bounds.max(), 0.0);
    let width = (max.x - min.x).abs();
    let height = (max.y - min.y).abs();

    let avail_w = (viewport[0] - 2.0 * padding).max(1.0);
    let avail_h = (viewport[1] - 2.0 * padding).max(1.0);

    if width <= f64::EPSILON && height <= f64::EPSILON {
        return max_zoom;
    }

    let scale_w = if width > f64::EPSILON { avail_w / width } else { f64::INFINITY };
    let scale_h = if height > f64::EPSILON { avail_h / height } else { f64::INFINITY };
    scale_w.min(scale_h).log2().floor().clamp(min_zoom, max_zoom)
}

/// Union of bounding boxes
pub fn union_bounds(rects: impl IntoIterator<Item = Rect<f64>>) -> Option<Rect<f64>> {
    rects.into_iter().reduce(|a, b| {
        Rect::new(
            Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
            Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_origin_projects_to_world_center() {
        let p = project(GeoCoord::new(0.0, 0.0), 0.0);
        assert!(close(p.x, 128.0) && close(p.y, 128.0));

        let p = project(GeoCoord::new(0.0, 0.0), 2.0);
        assert!(close(p.x, 512.0) && close(p.y, 512.0));
    }

    #[test]
    fn test_unproject_inverts_project() {
        let delhi = GeoCoord::new(28.6139, 77.2090);
        let back = unproject(project(delhi, 7.0), 7.0);
        assert!(close(back.lat, delhi.lat) && close(back.lon, delhi.lon));
    }

    #[test]
    fn test_fit_zoom_for_india() {
        let india = Rect::new(Coord { x: 68.0, y: 6.0 }, Coord { x: 97.5, y: 37.1 });
        let zoom = fit_zoom(india, [800.0, 600.0], 0.0, 1.0, 18.0);
        assert_eq!(zoom, 4.0);

        // A tiny box hits the ceiling
        let point = Rect::new(Coord { x: 77.0, y: 28.0 }, Coord { x: 77.0, y: 28.0 });
        assert_eq!(fit_zoom(point, [800.0, 600.0], 0.0, 1.0, 18.0), 18.0);
    }

    #[test]
    fn test_union_bounds() {
        let a = Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 });
        let b = Rect::new(Coord { x: 5.0, y: -2.0 }, Coord { x: 6.0, y: 0.5 });
        let u = union_bounds([a, b]).unwrap();
        assert_eq!(u.min(), Coord { x: 0.0, y: -2.0 });
        assert_eq!(u.max(), Coord { x: 6.0, y: 1.0 });
        assert!(union_bounds(Vec::new()).is_none());
    }
}
