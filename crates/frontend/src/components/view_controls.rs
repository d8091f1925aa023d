use dioxus::prelude::*;
use worldmap_shared::models::Coordinates;
use worldmap_shared::projection::ZOOM_MIN;

use crate::store::MapStore;

/// Visibility toggle, view readout and reset for a shared map store.
#[component]
pub fn ViewControls(store: MapStore) -> Element {
    let mut store = store;
    let show = store.show_unselected();
    let center = store.center();
    let zoom = store.zoom();
    let selected = store.selected_country();
    let center_text = format!("{:.1}°, {:.1}°", center.lon, center.lat);
    let zoom_text = format!("{zoom:.2}×");

    rsx! {
        div { class: "panel",
            h3 { "View" }
            label { class: "toggle-row",
                input {
                    r#type: "checkbox",
                    checked: show,
                    onchange: move |evt: Event<FormData>| store.set_show_unselected(evt.checked()),
                }
                "Show unselected countries"
            }
            div { class: "readout",
                span { "Center: {center_text}" }
                span { "Zoom: {zoom_text}" }
                if let Some(name) = selected {
                    span { "Selected: {name}" }
                }
            }
            div { class: "button-row",
                button {
                    class: "secondary",
                    onclick: move |_| store.clear_selection(),
                    "Clear selection"
                }
                button {
                    class: "secondary",
                    onclick: move |_| {
                        store.set_center(Coordinates::ORIGIN);
                        store.set_zoom(ZOOM_MIN);
                    },
                    "Reset view"
                }
            }
        }
    }
}
