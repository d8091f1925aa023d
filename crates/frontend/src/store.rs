use dioxus::prelude::*;
use worldmap_shared::countries::CountryTable;
use worldmap_shared::models::{Coordinates, CountryRecord, ViewState};
use worldmap_shared::projection::clamp_zoom;

/// Map view state shared by every embedded map bound to it.
///
/// Copy handle over signals; construct inside a component (usually through
/// [`use_map_store_provider`]) so the signals belong to that scope.
#[derive(Clone, Copy, PartialEq)]
pub struct MapStore {
    selected_country: Signal<Option<String>>,
    center: Signal<Coordinates>,
    zoom: Signal<f64>,
    show_unselected: Signal<bool>,
}

impl MapStore {
    pub fn new() -> Self {
        let defaults = ViewState::default();
        Self {
            selected_country: Signal::new(defaults.selected_country),
            center: Signal::new(defaults.center),
            zoom: Signal::new(defaults.zoom),
            show_unselected: Signal::new(defaults.show_unselected),
        }
    }

    // --- Readers ---

    pub fn selected_country(&self) -> Option<String> {
        self.selected_country.read().clone()
    }

    pub fn center(&self) -> Coordinates {
        *self.center.read()
    }

    pub fn zoom(&self) -> f64 {
        *self.zoom.read()
    }

    pub fn show_unselected(&self) -> bool {
        *self.show_unselected.read()
    }

    pub fn view_state(&self) -> ViewState {
        ViewState {
            selected_country: self.selected_country(),
            center: self.center(),
            zoom: self.zoom(),
            show_unselected: self.show_unselected(),
        }
    }

    // --- Mutators ---

    /// Select a country and frame every bound view on it.
    pub fn select_country(&mut self, record: &CountryRecord) {
        self.selected_country.set(Some(record.value.clone()));
        self.center.set(record.coordinates);
        self.zoom.set(clamp_zoom(record.zoom));
    }

    /// Look `name` up in `countries` and select it. Unknown names are ignored.
    pub fn select_country_by_name(&mut self, countries: &CountryTable, name: &str) -> bool {
        match countries.find(name) {
            Some(record) => {
                self.select_country(record);
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_country.set(None);
    }

    pub fn set_center(&mut self, center: Coordinates) {
        self.center.set(center);
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom.set(clamp_zoom(zoom));
    }

    pub fn set_show_unselected(&mut self, show: bool) {
        self.show_unselected.set(show);
    }
}

impl Default for MapStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a store and provide it to every component below the caller.
pub fn use_map_store_provider() -> MapStore {
    use_context_provider(MapStore::new)
}
