//! Fixed Mercator projection onto an 800x600 SVG canvas.
//!
//! The canvas is addressed in viewBox units. A view is described by a
//! geographic `center` and a `zoom` factor; the zoomable group places the
//! projected center in the middle of the canvas and scales around it.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use std::fmt::Write;

use crate::models::Coordinates;

pub const MAP_WIDTH: f64 = 800.0;
pub const MAP_HEIGHT: f64 = 600.0;
pub const PROJECTION_SCALE: f64 = 150.0;

pub const ZOOM_MIN: f64 = 1.0;
pub const ZOOM_MAX: f64 = 8.0;

/// Zoom multiplier applied per wheel notch.
pub const WHEEL_ZOOM_STEP: f64 = 1.2;

/// Latitude where the Mercator square ends (web-mercator extent).
pub const MAX_LATITUDE: f64 = 85.051_128_78;

/// Clamp a zoom value to the range the map accepts.
pub fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() {
        return ZOOM_MIN;
    }
    zoom.clamp(ZOOM_MIN, ZOOM_MAX)
}

/// Keep a center inside the projectable area.
pub fn clamp_center(c: Coordinates) -> Coordinates {
    Coordinates::new(
        c.lon.clamp(-180.0, 180.0),
        c.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE),
    )
}

/// Project a coordinate to canvas units at zoom 1.
pub fn project(c: Coordinates) -> (f64, f64) {
    let lambda = c.lon.to_radians();
    let phi = c.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = PROJECTION_SCALE * lambda + MAP_WIDTH / 2.0;
    let y = MAP_HEIGHT / 2.0 - PROJECTION_SCALE * (FRAC_PI_4 + phi / 2.0).tan().ln();
    (x, y)
}

/// Inverse of [`project`].
pub fn invert(x: f64, y: f64) -> Coordinates {
    let lambda = (x - MAP_WIDTH / 2.0) / PROJECTION_SCALE;
    let phi = 2.0 * ((MAP_HEIGHT / 2.0 - y) / PROJECTION_SCALE).exp().atan() - FRAC_PI_2;
    Coordinates::new(lambda.to_degrees(), phi.to_degrees())
}

/// Translation part of the zoomable-group transform.
fn group_translation(center: Coordinates, zoom: f64) -> (f64, f64) {
    let (px, py) = project(center);
    (MAP_WIDTH / 2.0 - px * zoom, MAP_HEIGHT / 2.0 - py * zoom)
}

/// SVG `transform` attribute for the group holding every region.
pub fn group_transform(center: Coordinates, zoom: f64) -> String {
    let (tx, ty) = group_translation(center, zoom);
    format!("translate({tx} {ty}) scale({zoom})")
}

/// Center after dragging the canvas by (`dx`, `dy`) viewBox units.
pub fn drag_center(start_center: Coordinates, zoom: f64, dx: f64, dy: f64) -> Coordinates {
    let zoom = clamp_zoom(zoom);
    let (px, py) = project(start_center);
    clamp_center(invert(px - dx / zoom, py - dy / zoom))
}

/// Zoom by `factor` keeping the content under `cursor` (viewBox units) fixed.
///
/// Returns the new center and clamped zoom.
pub fn zoom_at_point(
    center: Coordinates,
    zoom: f64,
    factor: f64,
    cursor: (f64, f64),
) -> (Coordinates, f64) {
    let old_zoom = clamp_zoom(zoom);
    let new_zoom = clamp_zoom(old_zoom * factor);
    if (new_zoom - old_zoom).abs() < 1e-9 {
        return (center, old_zoom);
    }

    let (tx, ty) = group_translation(center, old_zoom);
    let content_x = (cursor.0 - tx) / old_zoom;
    let content_y = (cursor.1 - ty) / old_zoom;

    let px = (MAP_WIDTH / 2.0 - cursor.0) / new_zoom + content_x;
    let py = (MAP_HEIGHT / 2.0 - cursor.1) / new_zoom + content_y;
    (clamp_center(invert(px, py)), new_zoom)
}

/// Wheel delta sign to zoom factor: scrolling up zooms in.
pub fn wheel_zoom_factor(delta_y: f64) -> f64 {
    if delta_y < 0.0 {
        WHEEL_ZOOM_STEP
    } else {
        1.0 / WHEEL_ZOOM_STEP
    }
}

/// Pixel distance between two touch points.
pub fn point_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (b.0 - a.0).hypot(b.1 - a.1)
}

/// View after a pinch that went from `start_distance` to `distance`,
/// anchored at `midpoint` (viewBox units).
///
/// Fingers closer than one pixel at the start leave the view as it was.
pub fn pinch_zoom(
    start_center: Coordinates,
    start_zoom: f64,
    start_distance: f64,
    distance: f64,
    midpoint: (f64, f64),
) -> (Coordinates, f64) {
    if start_distance < 1.0 || !distance.is_finite() {
        return (start_center, clamp_zoom(start_zoom));
    }
    zoom_at_point(start_center, start_zoom, distance / start_distance, midpoint)
}

/// Where the segment `from -> to` meets the antimeridian: the point on the
/// edge it leaves and the matching point on the edge it enters.
fn antimeridian_crossing(from: Coordinates, to: Coordinates) -> (Coordinates, Coordinates) {
    let edge = if from.lon < 0.0 { -180.0 } else { 180.0 };
    let span = to.lon + 2.0 * edge - from.lon;
    let t = if span.abs() < 1e-12 {
        0.0
    } else {
        (edge - from.lon) / span
    };
    let lat = from.lat + t * (to.lat - from.lat);
    (Coordinates::new(edge, lat), Coordinates::new(-edge, lat))
}

fn push_point(piece: &mut Vec<Coordinates>, point: Coordinates) {
    if piece.last() != Some(&point) {
        piece.push(point);
    }
}

/// Cut a ring into closed pieces that never cross the antimeridian.
///
/// Each crossing ends the current piece on one edge and starts the next on
/// the other. The last piece continues into the first. A ring crossing an
/// odd number of times encloses a pole, so that piece is closed along the
/// polar edge of the map.
fn split_at_antimeridian(ring: &[Coordinates]) -> Vec<Vec<Coordinates>> {
    let mut pieces: Vec<Vec<Coordinates>> = vec![Vec::new()];
    let (Some(&first), Some(&last)) = (ring.first(), ring.last()) else {
        return pieces;
    };

    let closing = (first != last).then_some(first);
    let mut crossings = 0usize;
    let mut prev: Option<Coordinates> = None;
    for point in ring.iter().copied().chain(closing) {
        if let Some(p) = prev.filter(|p| (point.lon - p.lon).abs() > 180.0) {
            let (leave, enter) = antimeridian_crossing(p, point);
            if let Some(piece) = pieces.last_mut() {
                push_point(piece, leave);
            }
            pieces.push(vec![enter]);
            crossings += 1;
        }
        if let Some(piece) = pieces.last_mut() {
            push_point(piece, point);
        }
        prev = Some(point);
    }

    if crossings == 0 {
        return pieces;
    }
    let head = pieces.remove(0);
    if let Some(tail) = pieces.last_mut() {
        for point in head {
            push_point(tail, point);
        }
        if crossings % 2 == 1 {
            let mean_lat = ring.iter().map(|c| c.lat).sum::<f64>() / ring.len() as f64;
            let pole = if mean_lat < 0.0 { -MAX_LATITUDE } else { MAX_LATITUDE };
            if let (Some(&start), Some(&end)) = (tail.first(), tail.last()) {
                push_point(tail, Coordinates::new(end.lon, pole));
                push_point(tail, Coordinates::new(start.lon, pole));
            }
        }
    }
    pieces
}

/// Build an SVG path for a set of rings, projected at zoom 1.
///
/// Rings crossing the antimeridian are cut there and closed along the map
/// edges instead of drawing a line across the whole map.
pub fn rings_to_path(rings: &[Vec<Coordinates>]) -> String {
    let mut d = String::with_capacity(rings.iter().map(|r| r.len() * 16).sum());
    for ring in rings {
        for piece in split_at_antimeridian(ring) {
            let mut cmd = 'M';
            for &point in &piece {
                let (x, y) = project(point);
                let _ = write!(d, "{cmd}{x:.2},{y:.2}");
                cmd = 'L';
            }
            if !piece.is_empty() {
                d.push('Z');
            }
        }
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_project_origin_is_canvas_center() {
        let (x, y) = project(Coordinates::ORIGIN);
        assert!(approx(x, 400.0, 1e-9));
        assert!(approx(y, 300.0, 1e-9));
    }

    #[test]
    fn test_project_east_and_north() {
        let (x, y) = project(Coordinates::new(90.0, 45.0));
        assert!(x > 400.0);
        assert!(y < 300.0);
        assert!(approx(x, 400.0 + 150.0 * std::f64::consts::FRAC_PI_2, 1e-9));
    }

    #[test]
    fn test_invert_undoes_project() {
        for c in [
            Coordinates::new(2.2, 46.2),
            Coordinates::new(-99.0, 19.4),
            Coordinates::new(151.2, -33.9),
        ] {
            let (x, y) = project(c);
            let back = invert(x, y);
            assert!(approx(back.lon, c.lon, 1e-9));
            assert!(approx(back.lat, c.lat, 1e-9));
        }
    }

    #[test]
    fn test_project_clamps_poles() {
        let (_, y) = project(Coordinates::new(0.0, -90.0));
        assert!(y.is_finite());
    }

    #[test]
    fn test_clamp_zoom_accepts_bounds() {
        assert_eq!(clamp_zoom(1.0), 1.0);
        assert_eq!(clamp_zoom(8.0), 8.0);
        assert_eq!(clamp_zoom(4.5), 4.5);
    }

    #[test]
    fn test_clamp_zoom_rejects_outside() {
        assert_eq!(clamp_zoom(0.5), ZOOM_MIN);
        assert_eq!(clamp_zoom(-3.0), ZOOM_MIN);
        assert_eq!(clamp_zoom(8.01), ZOOM_MAX);
        assert_eq!(clamp_zoom(100.0), ZOOM_MAX);
        assert_eq!(clamp_zoom(f64::NAN), ZOOM_MIN);
    }

    #[test]
    fn test_group_transform_identity_at_origin() {
        assert_eq!(group_transform(Coordinates::ORIGIN, 1.0), "translate(0 0) scale(1)");
    }

    #[test]
    fn test_group_transform_centers_projected_point() {
        let center = Coordinates::new(30.0, 10.0);
        let zoom = 3.0;
        let (tx, ty) = group_translation(center, zoom);
        let (px, py) = project(center);
        assert!(approx(px * zoom + tx, MAP_WIDTH / 2.0, 1e-9));
        assert!(approx(py * zoom + ty, MAP_HEIGHT / 2.0, 1e-9));
    }

    #[test]
    fn test_drag_center_moves_opposite_to_drag() {
        let c = drag_center(Coordinates::ORIGIN, 1.0, 150.0, 0.0);
        // Dragging the map right by one radian of canvas shows the west.
        assert!(approx(c.lon, -(1.0_f64).to_degrees(), 1e-9));
        assert!(approx(c.lat, 0.0, 1e-9));
    }

    #[test]
    fn test_drag_center_scaled_by_zoom() {
        let at1 = drag_center(Coordinates::ORIGIN, 1.0, 100.0, 0.0);
        let at4 = drag_center(Coordinates::ORIGIN, 4.0, 100.0, 0.0);
        assert!(approx(at1.lon, at4.lon * 4.0, 1e-9));
    }

    #[test]
    fn test_drag_center_clamped() {
        let c = drag_center(Coordinates::ORIGIN, 1.0, -10_000.0, -10_000.0);
        assert_eq!(c.lon, 180.0);
        assert!(approx(c.lat, -MAX_LATITUDE, 1e-6));
    }

    #[test]
    fn test_zoom_at_canvas_center_keeps_center() {
        let center = Coordinates::new(10.0, 20.0);
        let (c, z) = zoom_at_point(center, 2.0, 2.0, (MAP_WIDTH / 2.0, MAP_HEIGHT / 2.0));
        assert_eq!(z, 4.0);
        assert!(approx(c.lon, 10.0, 1e-9));
        assert!(approx(c.lat, 20.0, 1e-9));
    }

    #[test]
    fn test_zoom_at_point_keeps_cursor_content_fixed() {
        let center = Coordinates::new(-20.0, 5.0);
        let cursor = (600.0, 150.0);
        let (tx, ty) = group_translation(center, 1.5);
        let content = ((cursor.0 - tx) / 1.5, (cursor.1 - ty) / 1.5);

        let (new_center, new_zoom) = zoom_at_point(center, 1.5, WHEEL_ZOOM_STEP, cursor);
        let (ntx, nty) = group_translation(new_center, new_zoom);
        assert!(approx(content.0 * new_zoom + ntx, cursor.0, 1e-6));
        assert!(approx(content.1 * new_zoom + nty, cursor.1, 1e-6));
    }

    #[test]
    fn test_zoom_at_point_saturates() {
        let center = Coordinates::new(5.0, 5.0);
        let (c, z) = zoom_at_point(center, 8.0, 2.0, (100.0, 100.0));
        assert_eq!(z, 8.0);
        assert_eq!(c, center);

        let (_, z) = zoom_at_point(center, 1.1, 0.5, (100.0, 100.0));
        assert_eq!(z, 1.0);
    }

    #[test]
    fn test_wheel_zoom_factor() {
        assert!(wheel_zoom_factor(-3.0) > 1.0);
        assert!(wheel_zoom_factor(3.0) < 1.0);
    }

    #[test]
    fn test_rings_to_path_closes_rings() {
        let ring = vec![
            Coordinates::new(0.0, 0.0),
            Coordinates::new(10.0, 0.0),
            Coordinates::new(10.0, 10.0),
        ];
        let d = rings_to_path(&[ring]);
        assert!(d.starts_with("M400.00,300.00"));
        assert_eq!(d.matches('M').count(), 1);
        // The open ring is closed back to its first point.
        assert_eq!(d.matches('L').count(), 3);
        assert!(d.ends_with("L400.00,300.00Z"));
    }

    #[test]
    fn test_rings_to_path_splits_at_antimeridian() {
        let ring = vec![
            Coordinates::new(170.0, 60.0),
            Coordinates::new(179.0, 62.0),
            Coordinates::new(-179.0, 63.0),
            Coordinates::new(-170.0, 65.0),
        ];
        let d = rings_to_path(&[ring]);
        assert_eq!(d.matches('M').count(), 2);
        assert_eq!(d.matches('Z').count(), 2);
    }

    #[test]
    fn test_split_adds_edge_points() {
        let ring = vec![
            Coordinates::new(170.0, 60.0),
            Coordinates::new(179.0, 62.0),
            Coordinates::new(-179.0, 64.0),
            Coordinates::new(-170.0, 65.0),
            Coordinates::new(-170.0, 70.0),
            Coordinates::new(170.0, 70.0),
            Coordinates::new(170.0, 60.0),
        ];
        let pieces = split_at_antimeridian(&ring);
        assert_eq!(pieces.len(), 2);
        for piece in &pieces {
            let edge = piece.iter().filter(|c| c.lon.abs() == 180.0).count();
            assert_eq!(edge, 2);
            assert!(piece.iter().all(|c| c.lon.abs() <= 180.0));
        }
        let west = pieces.iter().find(|p| p.iter().any(|c| c.lon < 0.0)).unwrap();
        assert!(west.contains(&Coordinates::new(-180.0, 63.0)));
        assert!(west.iter().all(|c| c.lon < 0.0));
    }

    #[test]
    fn test_ring_around_south_pole_is_one_filled_shape() {
        let ring = vec![
            Coordinates::new(0.0, -70.0),
            Coordinates::new(-180.0, -84.0),
            Coordinates::new(-180.0, -90.0),
            Coordinates::new(180.0, -90.0),
            Coordinates::new(180.0, -84.0),
            Coordinates::new(0.0, -70.0),
        ];
        let d = rings_to_path(&[ring]);
        assert_eq!(d.matches('M').count(), 1);
        assert_eq!(d.matches('Z').count(), 1);
        // Both bottom corners of the map are part of the outline.
        assert!(d.contains("-71.24,771.24"));
        assert!(d.contains("871.24,771.24"));
    }

    #[test]
    fn test_ring_around_north_pole_closes_along_top() {
        let ring = vec![
            Coordinates::new(-120.0, 75.0),
            Coordinates::new(0.0, 80.0),
            Coordinates::new(120.0, 75.0),
            Coordinates::new(-120.0, 75.0),
        ];
        let pieces = split_at_antimeridian(&ring);
        assert_eq!(pieces.len(), 1);
        let (_, top) = project(Coordinates::new(0.0, MAX_LATITUDE));
        let polar = pieces[0].iter().filter(|c| c.lat == MAX_LATITUDE).count();
        assert_eq!(polar, 2);
        assert!(approx(top, project(Coordinates::new(0.0, 90.0)).1, 1e-9));
    }

    #[test]
    fn test_point_distance() {
        assert!(approx(point_distance((0.0, 0.0), (3.0, 4.0)), 5.0, 1e-12));
    }

    #[test]
    fn test_pinch_zoom_scales_by_finger_spread() {
        let mid = (MAP_WIDTH / 2.0, MAP_HEIGHT / 2.0);
        let (c, z) = pinch_zoom(Coordinates::ORIGIN, 2.0, 100.0, 150.0, mid);
        assert!(approx(z, 3.0, 1e-9));
        assert!(approx(c.lon, 0.0, 1e-9));

        let (_, z) = pinch_zoom(Coordinates::ORIGIN, 2.0, 100.0, 10.0, mid);
        assert_eq!(z, ZOOM_MIN);
    }

    #[test]
    fn test_pinch_zoom_keeps_midpoint_content_fixed() {
        let center = Coordinates::new(15.0, -10.0);
        let mid = (250.0, 420.0);
        let (tx, ty) = group_translation(center, 1.0);
        let content = (mid.0 - tx, mid.1 - ty);

        let (nc, nz) = pinch_zoom(center, 1.0, 80.0, 200.0, mid);
        let (ntx, nty) = group_translation(nc, nz);
        assert!(approx(content.0 * nz + ntx, mid.0, 1e-6));
        assert!(approx(content.1 * nz + nty, mid.1, 1e-6));
    }

    #[test]
    fn test_pinch_zoom_ignores_touching_fingers() {
        let center = Coordinates::new(5.0, 5.0);
        assert_eq!(pinch_zoom(center, 3.0, 0.5, 90.0, (10.0, 10.0)), (center, 3.0));
    }

    #[test]
    fn test_rings_to_path_empty() {
        assert_eq!(rings_to_path(&[]), "");
        assert_eq!(rings_to_path(&[vec![]]), "");
    }
}
