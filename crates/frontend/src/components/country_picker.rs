use dioxus::prelude::*;
use worldmap_shared::countries::CountryTable;

use crate::store::MapStore;

#[component]
pub fn CountryPicker(countries: CountryTable, store: MapStore) -> Element {
    let mut store = store;
    let selected = store.selected_country().unwrap_or_default();
    let options = countries.clone();

    rsx! {
        div { class: "panel",
            h3 { "Country" }
            select {
                "aria-label": "Select country",
                value: "{selected}",
                onchange: move |evt: Event<FormData>| {
                    let name = evt.value();
                    if name.is_empty() {
                        store.clear_selection();
                    } else if !store.select_country_by_name(&countries, &name) {
                        tracing::warn!(country = %name, "picked a country missing from the table");
                    }
                },
                option { value: "", "-- No selection --" }
                for c in options.records() {
                    option {
                        value: "{c.value}",
                        selected: selected == c.value,
                        "{c.value}"
                    }
                }
            }
        }
    }
}
