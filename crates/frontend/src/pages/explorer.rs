use dioxus::prelude::*;

use crate::api;
use crate::components::country_picker::CountryPicker;
use crate::components::view_controls::ViewControls;
use crate::components::world_map::WorldMap;
use crate::store::use_map_store_provider;

/// Two embedded maps bound to one store, plus controls driving that store.
#[component]
pub fn Explorer() -> Element {
    let store = use_map_store_provider();
    let countries_resource = use_resource(|| api::fetch_countries());

    let countries = match &*countries_resource.read() {
        Some(Ok(c)) => Some(c.clone()),
        Some(Err(err)) => return Err(err.clone().into()),
        None => None,
    };

    rsx! {
        div { class: "app",
            div { class: "header",
                h1 { "World Map Explorer" }
            }

            div { class: "sidebar",
                if let Some(countries) = countries {
                    CountryPicker { countries: countries, store: store }
                }
                ViewControls { store: store }
            }

            div { class: "map-panel",
                // Bound explicitly
                WorldMap { store: store }
            }
            div { class: "map-panel overview",
                // Bound through context
                WorldMap {}
            }
        }
    }
}

/// A single standalone map framed on one country.
#[component]
pub fn CountryFocus(name: String) -> Element {
    rsx! {
        div { class: "app focus",
            div { class: "header",
                h1 { "{name}" }
                Link { to: crate::Route::Home {}, "Back to explorer" }
            }
            div { class: "map-panel",
                WorldMap {
                    initial_country: name.clone(),
                    default_show_unselected: false,
                    standalone: true,
                }
            }
        }
    }
}
