use dioxus::prelude::*;
use worldmap_shared::models::{Coordinates, CountryRecord, ViewState};
use worldmap_shared::port::{LocalViewState, PortChoice, ViewStatePort};

use crate::store::MapStore;

/// View state owned by a single map instance.
#[derive(Clone, Copy, PartialEq)]
pub struct LocalPort(pub Signal<LocalViewState>);

impl ViewStatePort for LocalPort {
    fn view_state(&self) -> ViewState {
        self.0.read().view_state()
    }

    fn select_country(&mut self, record: &CountryRecord) {
        self.0.write().select_country(record);
    }

    fn set_center(&mut self, center: Coordinates) {
        self.0.write().set_center(center);
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.0.write().set_zoom(zoom);
    }
}

/// View state read from and written to a [`MapStore`].
#[derive(Clone, Copy, PartialEq)]
pub struct StorePort(pub MapStore);

impl ViewStatePort for StorePort {
    fn view_state(&self) -> ViewState {
        self.0.view_state()
    }

    fn select_country(&mut self, record: &CountryRecord) {
        self.0.select_country(record);
    }

    fn set_center(&mut self, center: Coordinates) {
        self.0.set_center(center);
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.0.set_zoom(zoom);
    }
}

pub type ViewPort = PortChoice<LocalPort, StorePort>;
