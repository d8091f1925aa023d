use worldmap_shared::projection::{MAP_HEIGHT, MAP_WIDTH};

/// Pixels per viewBox unit and the letterbox offset of the SVG canvas.
///
/// The canvas keeps its aspect ratio (`xMidYMid meet`), so the viewBox is
/// scaled by the tighter axis and centered along the other one.
fn view_box_fit(container_w: f64, container_h: f64) -> Option<(f64, f64, f64)> {
    if container_w <= 0.0 || container_h <= 0.0 {
        return None;
    }
    let scale = (container_w / MAP_WIDTH).min(container_h / MAP_HEIGHT);
    let offset_x = (container_w - MAP_WIDTH * scale) / 2.0;
    let offset_y = (container_h - MAP_HEIGHT * scale) / 2.0;
    Some((scale, offset_x, offset_y))
}

/// Pure function: convert container-relative pixels to viewBox units.
pub fn container_to_view_box(
    container_x: f64,
    container_y: f64,
    container_w: f64,
    container_h: f64,
) -> Option<(f64, f64)> {
    let (scale, offset_x, offset_y) = view_box_fit(container_w, container_h)?;
    Some(((container_x - offset_x) / scale, (container_y - offset_y) / scale))
}

/// Convert a pointer movement in pixels to viewBox units.
pub fn pixel_delta_to_view_box(
    dx: f64,
    dy: f64,
    container_w: f64,
    container_h: f64,
) -> Option<(f64, f64)> {
    let (scale, _, _) = view_box_fit(container_w, container_h)?;
    Some((dx / scale, dy / scale))
}

/// Get the bounding client rect of a map container element.
pub fn container_rect(container_id: &str) -> Option<web_sys::DomRect> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(container_id)?;
    Some(element.get_bounding_client_rect())
}

/// Client (viewport) coordinates to viewBox units of the given container.
pub fn client_to_view_box(client_x: f64, client_y: f64, container_id: &str) -> Option<(f64, f64)> {
    let rect = container_rect(container_id)?;
    container_to_view_box(
        client_x - rect.left(),
        client_y - rect.top(),
        rect.width(),
        rect.height(),
    )
}

/// Pixel drag delta to viewBox units of the given container.
pub fn client_delta_to_view_box(dx: f64, dy: f64, container_id: &str) -> Option<(f64, f64)> {
    let rect = container_rect(container_id)?;
    pixel_delta_to_view_box(dx, dy, rect.width(), rect.height())
}
