use std::sync::atomic::{AtomicUsize, Ordering};

use dioxus::html::geometry::WheelDelta;
use dioxus::html::input_data::MouseButton;
use dioxus::html::TouchPoint;
use dioxus::prelude::*;
use worldmap_shared::models::{Coordinates, ScreenPoint};
use worldmap_shared::port::{apply_initial_country, choose_port, commit_move, LocalViewState, ViewStatePort};
use worldmap_shared::projection::{self, MAP_HEIGHT, MAP_WIDTH};
use worldmap_shared::style::{self, HoverState, Interaction};
use worldmap_shared::MapError;

use crate::api::{self, RegionShape};
use crate::components::tooltip::Tooltip;
use crate::coords;
use crate::ports::{LocalPort, StorePort, ViewPort};
use crate::store::MapStore;

/// Drag threshold in pixels. Movement below this is a click.
const DRAG_THRESHOLD: f64 = 3.0;

/// Touch drag threshold in pixels.
const TOUCH_DRAG_THRESHOLD: f64 = 8.0;

static NEXT_MAP_ID: AtomicUsize = AtomicUsize::new(0);

/// An in-progress pan gesture. Nothing is committed until it ends.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    start: (f64, f64),
    start_center: Coordinates,
    zoom: f64,
    current: Coordinates,
    moved: bool,
}

impl Drag {
    fn new(start: (f64, f64), center: Coordinates, zoom: f64) -> Self {
        Self {
            start,
            start_center: center,
            zoom,
            current: center,
            moved: false,
        }
    }

    /// Track the pointer; returns false if the container can't be measured.
    fn update(&mut self, pointer: (f64, f64), threshold: f64, container_id: &str) -> bool {
        let dx = pointer.0 - self.start.0;
        let dy = pointer.1 - self.start.1;
        if !self.moved && (dx.abs() > threshold || dy.abs() > threshold) {
            self.moved = true;
        }
        if !self.moved {
            return true;
        }
        let Some((vdx, vdy)) = coords::client_delta_to_view_box(dx, dy, container_id) else {
            return false;
        };
        self.current = projection::drag_center(self.start_center, self.zoom, vdx, vdy);
        true
    }

    /// Continue the pan from a view committed mid-gesture (a wheel zoom).
    fn rebase(&mut self, pointer: (f64, f64), center: Coordinates, zoom: f64) {
        self.start = pointer;
        self.start_center = center;
        self.current = center;
        self.zoom = zoom;
    }
}

/// An in-progress two-finger zoom. Committed when the last finger lifts.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Pinch {
    start_distance: f64,
    start_center: Coordinates,
    start_zoom: f64,
    midpoint: (f64, f64),
    current: Coordinates,
    zoom: f64,
}

impl Pinch {
    fn new(start_distance: f64, midpoint: (f64, f64), center: Coordinates, zoom: f64) -> Self {
        Self {
            start_distance,
            start_center: center,
            start_zoom: zoom,
            midpoint,
            current: center,
            zoom,
        }
    }

    fn update(&mut self, distance: f64) {
        let (center, zoom) = projection::pinch_zoom(
            self.start_center,
            self.start_zoom,
            self.start_distance,
            distance,
            self.midpoint,
        );
        self.current = center;
        self.zoom = zoom;
    }
}

fn touch_points(touches: &[TouchPoint]) -> Option<((f64, f64), (f64, f64))> {
    let [a, b, ..] = touches else { return None };
    let a = a.client_coordinates();
    let b = b.client_coordinates();
    Some(((a.x, a.y), (b.x, b.y)))
}

/// Convert a wheel delta (pixels / lines / pages) to a uniform pixel-like value.
fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

/// Commit a finished pan if the pointer moved.
fn end_drag<P: ViewStatePort>(ended: Option<Drag>, port: &mut P) {
    if let Some(d) = ended.filter(|d| d.moved) {
        commit_move(port, d.current, d.zoom);
    }
}

/// End a pan gesture, committing the new center if the pointer moved.
fn finish_drag(drag: &mut Signal<Option<Drag>>, port: &mut ViewPort) {
    let ended = *drag.peek();
    drag.set(None);
    end_drag(ended, port);
}

fn finish_pinch(pinch: &mut Signal<Option<Pinch>>, port: &mut ViewPort) {
    let ended = *pinch.peek();
    pinch.set(None);
    if let Some(p) = ended {
        commit_move(port, p.current, p.zoom);
    }
}

#[component]
fn Region(
    shape: RegionShape,
    selected: bool,
    show_unselected: bool,
    interaction: Interaction,
    hover: Signal<HoverState>,
) -> Element {
    // Written from handlers only, never read here.
    let mut hover = hover;
    let visible = style::is_visible(selected, show_unselected);
    let look = style::region_style(selected, show_unselected, interaction);
    let cursor = look.cursor;

    let enter_key = shape.key.clone();
    let press_key = shape.key.clone();
    let name = shape.name.clone();

    rsx! {
        path {
            d: "{shape.d}",
            fill: "{look.fill}",
            stroke: "{look.stroke}",
            stroke_width: "{look.stroke_width}",
            style: "outline: none; cursor: {cursor};",
            onmouseenter: move |evt: Event<MouseData>| {
                let client = evt.client_coordinates();
                hover
                    .write()
                    .enter(&enter_key, &name, visible, ScreenPoint::new(client.x, client.y));
            },
            onmouseleave: move |_| hover.write().leave(),
            onmousedown: move |_| hover.write().press(&press_key),
            onmouseup: move |_| hover.write().release(),
        }
    }
}

/// Interactive world map with one selectable country.
///
/// A standalone map owns its view state. Otherwise it binds to `store`, or
/// to a [`MapStore`] provided by an ancestor.
#[component]
pub fn WorldMap(
    initial_country: Option<String>,
    #[props(default = true)] default_show_unselected: bool,
    #[props(default)] standalone: bool,
    store: Option<MapStore>,
) -> Element {
    let container_id = use_hook(|| format!("world-map-{}", NEXT_MAP_ID.fetch_add(1, Ordering::Relaxed)));

    let local = use_signal(|| LocalViewState::new(default_show_unselected));
    let context_store = try_use_context::<MapStore>();
    let port: ViewPort = use_hook(move || {
        choose_port(standalone, LocalPort(local), store.or(context_store).map(StorePort))
    });

    let mut hover = use_signal(HoverState::default);
    let mut drag = use_signal(|| None::<Drag>);
    let mut pinch = use_signal(|| None::<Pinch>);

    let regions = use_resource(|| api::fetch_regions());

    // Owned by this scope: dropped on unmount or when the id changes, so a
    // slow table load never writes into a dead view.
    let initial = use_resource(use_reactive!(|initial_country| async move {
        let Some(id) = initial_country else {
            return Ok::<(), MapError>(());
        };
        let countries = api::fetch_countries().await?;
        let mut port = port;
        apply_initial_country(&mut port, &countries, &id);
        Ok(())
    }));

    if let Some(Err(err)) = &*initial.read() {
        tracing::error!(%err, "country table failed to load");
        return Err(err.clone().into());
    }
    let shapes: Vec<RegionShape> = match &*regions.read() {
        Some(Ok(shapes)) => shapes.clone(),
        Some(Err(err)) => {
            tracing::error!(%err, "world geometry failed to load");
            return Err(err.clone().into());
        }
        None => {
            return rsx! {
                div { class: "world-map loading", "Loading map…" }
            }
        }
    };

    let state = port.view_state();
    let (center, zoom) = match (*pinch.read(), *drag.read()) {
        (Some(p), _) => (p.current, p.zoom),
        (None, Some(d)) if d.moved => (d.current, d.zoom),
        _ => (state.center, state.zoom),
    };
    let transform = projection::group_transform(center, zoom);
    let dragging = drag.read().is_some_and(|d| d.moved);
    let container_class = if dragging { "world-map dragging" } else { "world-map" };
    let hover_state = hover.read().clone();
    let tooltip = hover_state.tooltip.clone();

    let wheel_id = container_id.clone();
    let move_id = container_id.clone();
    let touch_id = container_id.clone();
    let pinch_id = container_id.clone();

    rsx! {
        div {
            id: "{container_id}",
            class: "{container_class}",

            onwheel: move |evt: Event<WheelData>| {
                evt.prevent_default();
                let client = evt.data().client_coordinates();
                let Some(cursor) = coords::client_to_view_box(client.x, client.y, &wheel_id) else {
                    return;
                };
                // Zoom from what is on screen, including an uncommitted pan.
                let dragging = *drag.peek();
                let (from_center, from_zoom) = match dragging {
                    Some(d) if d.moved => (d.current, d.zoom),
                    _ => {
                        let current = port.view_state();
                        (current.center, current.zoom)
                    }
                };
                let factor = projection::wheel_zoom_factor(wheel_delta_y(evt.data().delta()));
                let (new_center, new_zoom) =
                    projection::zoom_at_point(from_center, from_zoom, factor, cursor);
                if (new_zoom - from_zoom).abs() < 1e-9 {
                    return;
                }
                let mut port = port;
                commit_move(&mut port, new_center, new_zoom);
                if let Some(mut d) = dragging {
                    d.rebase((client.x, client.y), new_center, new_zoom);
                    drag.set(Some(d));
                }
            },

            onmousedown: move |evt: Event<MouseData>| {
                // Only track drag for the left mouse button
                if evt.trigger_button() != Some(MouseButton::Primary) {
                    return;
                }
                let client = evt.client_coordinates();
                let current = port.view_state();
                drag.set(Some(Drag::new((client.x, client.y), current.center, current.zoom)));
            },

            onmousemove: move |evt: Event<MouseData>| {
                let Some(mut d) = *drag.peek() else { return };
                let client = evt.client_coordinates();
                if d.update((client.x, client.y), DRAG_THRESHOLD, &move_id) {
                    drag.set(Some(d));
                }
            },

            onmouseup: move |_| {
                let mut port = port;
                finish_drag(&mut drag, &mut port);
            },

            onmouseleave: move |_| {
                let mut port = port;
                finish_drag(&mut drag, &mut port);
                hover.write().leave();
            },

            // --- Touch: single-finger pan, two-finger pinch ---

            ontouchstart: move |evt: Event<TouchData>| {
                let touches = evt.data().touches();
                let mut port = port;
                if let Some((a, b)) = touch_points(&touches) {
                    // Keep a pan that was already under way, then zoom from there.
                    finish_drag(&mut drag, &mut port);
                    if pinch.peek().is_some() {
                        return;
                    }
                    let mid = ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0);
                    let Some(midpoint) = coords::client_to_view_box(mid.0, mid.1, &pinch_id) else {
                        return;
                    };
                    let current = port.view_state();
                    pinch.set(Some(Pinch::new(
                        projection::point_distance(a, b),
                        midpoint,
                        current.center,
                        current.zoom,
                    )));
                    return;
                }
                if pinch.peek().is_some() || touches.len() != 1 {
                    return;
                }
                let point = touches[0].client_coordinates();
                let current = port.view_state();
                drag.set(Some(Drag::new((point.x, point.y), current.center, current.zoom)));
            },

            ontouchmove: move |evt: Event<TouchData>| {
                let touches = evt.data().touches();
                let current_pinch = *pinch.peek();
                if let Some(mut p) = current_pinch {
                    evt.prevent_default();
                    if let Some((a, b)) = touch_points(&touches) {
                        p.update(projection::point_distance(a, b));
                        pinch.set(Some(p));
                    }
                    return;
                }
                let Some(mut d) = *drag.peek() else { return };
                if touches.len() != 1 {
                    return;
                }
                evt.prevent_default();
                let point = touches[0].client_coordinates();
                if d.update((point.x, point.y), TOUCH_DRAG_THRESHOLD, &touch_id) {
                    drag.set(Some(d));
                }
            },

            ontouchend: move |evt: Event<TouchData>| {
                if evt.data().touches().is_empty() {
                    let mut port = port;
                    finish_pinch(&mut pinch, &mut port);
                    finish_drag(&mut drag, &mut port);
                }
            },

            ontouchcancel: move |_| {
                drag.set(None);
                pinch.set(None);
                hover.write().leave();
            },

            svg {
                view_box: "0 0 {MAP_WIDTH} {MAP_HEIGHT}",
                preserve_aspect_ratio: "xMidYMid meet",
                width: "100%",
                height: "100%",

                g {
                    transform: "{transform}",
                    for shape in shapes {
                        Region {
                            key: "{shape.key}",
                            selected: state.is_selected(&shape.name),
                            show_unselected: state.show_unselected,
                            interaction: hover_state.interaction(&shape.key),
                            shape: shape.clone(),
                            hover: hover,
                        }
                    }
                }
            }

            if let Some(tip) = tooltip {
                Tooltip { tooltip: tip }
            }
        }
    }
}
