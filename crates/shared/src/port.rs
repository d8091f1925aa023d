use crate::countries::CountryTable;
use crate::models::{Coordinates, CountryRecord, ViewState};
use crate::projection::{clamp_center, clamp_zoom};

/// Where a map view reads and writes its selection and pan/zoom state.
///
/// A standalone map keeps it to itself; an embedded map shares it through
/// a store with every other view bound to that store.
pub trait ViewStatePort {
    fn view_state(&self) -> ViewState;

    /// Select a country and frame the view on it.
    fn select_country(&mut self, record: &CountryRecord);

    fn set_center(&mut self, center: Coordinates);

    fn set_zoom(&mut self, zoom: f64);
}

impl<P: ViewStatePort + ?Sized> ViewStatePort for &mut P {
    fn view_state(&self) -> ViewState {
        (**self).view_state()
    }

    fn select_country(&mut self, record: &CountryRecord) {
        (**self).select_country(record);
    }

    fn set_center(&mut self, center: Coordinates) {
        (**self).set_center(center);
    }

    fn set_zoom(&mut self, zoom: f64) {
        (**self).set_zoom(zoom);
    }
}

/// Plain in-memory view state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalViewState {
    pub state: ViewState,
}

impl LocalViewState {
    pub fn new(show_unselected: bool) -> Self {
        Self {
            state: ViewState::with_show_unselected(show_unselected),
        }
    }
}

impl ViewStatePort for LocalViewState {
    fn view_state(&self) -> ViewState {
        self.state.clone()
    }

    fn select_country(&mut self, record: &CountryRecord) {
        self.state.selected_country = Some(record.value.clone());
        self.state.center = record.coordinates;
        self.state.zoom = clamp_zoom(record.zoom);
    }

    fn set_center(&mut self, center: Coordinates) {
        self.state.center = center;
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.state.zoom = clamp_zoom(zoom);
    }
}

/// The port a map instance ended up with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PortChoice<L, S> {
    Local(L),
    Shared(S),
}

impl<L, S> PortChoice<L, S> {
    pub fn is_shared(&self) -> bool {
        matches!(self, PortChoice::Shared(_))
    }
}

impl<L: ViewStatePort, S: ViewStatePort> ViewStatePort for PortChoice<L, S> {
    fn view_state(&self) -> ViewState {
        match self {
            PortChoice::Local(p) => p.view_state(),
            PortChoice::Shared(p) => p.view_state(),
        }
    }

    fn select_country(&mut self, record: &CountryRecord) {
        match self {
            PortChoice::Local(p) => p.select_country(record),
            PortChoice::Shared(p) => p.select_country(record),
        }
    }

    fn set_center(&mut self, center: Coordinates) {
        match self {
            PortChoice::Local(p) => p.set_center(center),
            PortChoice::Shared(p) => p.set_center(center),
        }
    }

    fn set_zoom(&mut self, zoom: f64) {
        match self {
            PortChoice::Local(p) => p.set_zoom(zoom),
            PortChoice::Shared(p) => p.set_zoom(zoom),
        }
    }
}

/// Pick the port for a map instance.
///
/// An embedded map with no store to bind to keeps its own state rather than
/// rendering a frozen default view.
pub fn choose_port<L, S>(standalone: bool, local: L, shared: Option<S>) -> PortChoice<L, S> {
    match (standalone, shared) {
        (true, _) => PortChoice::Local(local),
        (false, Some(store)) => PortChoice::Shared(store),
        (false, None) => {
            tracing::warn!("embedded map has no store to bind to, keeping local state");
            PortChoice::Local(local)
        }
    }
}

/// Select `id` on the port if the table knows it. Unknown ids are ignored.
///
/// Returns whether a record was applied.
pub fn apply_initial_country<P: ViewStatePort>(port: &mut P, table: &CountryTable, id: &str) -> bool {
    match table.find(id) {
        Some(record) => {
            port.select_country(record);
            true
        }
        None => {
            tracing::debug!(country = id, "initial country not in lookup table");
            false
        }
    }
}

/// Commit the view at the end of a pan/zoom gesture.
pub fn commit_move<P: ViewStatePort>(port: &mut P, center: Coordinates, zoom: f64) {
    port.set_center(clamp_center(center));
    port.set_zoom(clamp_zoom(zoom));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct RecordingPort {
        inner: LocalViewState,
        calls: Vec<&'static str>,
    }

    impl ViewStatePort for RecordingPort {
        fn view_state(&self) -> ViewState {
            self.inner.view_state()
        }

        fn select_country(&mut self, record: &CountryRecord) {
            self.calls.push("select_country");
            self.inner.select_country(record);
        }

        fn set_center(&mut self, center: Coordinates) {
            self.calls.push("set_center");
            self.inner.set_center(center);
        }

        fn set_zoom(&mut self, zoom: f64) {
            self.calls.push("set_zoom");
            self.inner.set_zoom(zoom);
        }
    }

    fn table() -> CountryTable {
        CountryTable::new(vec![
            CountryRecord {
                value: "France".to_string(),
                coordinates: Coordinates::new(2.2, 46.2),
                zoom: 4.0,
            },
            CountryRecord {
                value: "Brazil".to_string(),
                coordinates: Coordinates::new(-51.9, -14.2),
                zoom: 2.5,
            },
            CountryRecord {
                value: "Russia".to_string(),
                coordinates: Coordinates::new(97.7, 61.5),
                zoom: 1.0,
            },
        ])
    }

    #[test]
    fn test_initial_country_applies_record() {
        let table = table();
        for record in table.records() {
            for show in [true, false] {
                let mut port = LocalViewState::new(show);
                assert!(apply_initial_country(&mut port, &table, &record.value));
                let state = port.view_state();
                assert_eq!(state.selected_country.as_deref(), Some(record.value.as_str()));
                assert_eq!(state.center, record.coordinates);
                assert_eq!(state.zoom, record.zoom);
                assert_eq!(state.show_unselected, show);
            }
        }
    }

    #[test]
    fn test_unknown_initial_country_leaves_default() {
        let mut port = LocalViewState::new(true);
        assert!(!apply_initial_country(&mut port, &table(), "Atlantis"));
        assert_eq!(port.view_state(), ViewState::default());
    }

    #[test]
    fn test_unknown_initial_country_issues_no_mutation() {
        let mut port = RecordingPort::default();
        apply_initial_country(&mut port, &table(), "france");
        assert!(port.calls.is_empty());
    }

    #[test]
    fn test_standalone_moves_never_touch_store() {
        let mut port = choose_port(true, RecordingPort::default(), Some(RecordingPort::default()));
        for i in 0..5 {
            commit_move(&mut port, Coordinates::new(i as f64, 0.0), 2.0);
        }
        match port {
            PortChoice::Local(local) => {
                assert_eq!(local.calls.len(), 10);
                assert_eq!(local.view_state().center, Coordinates::new(4.0, 0.0));
            }
            PortChoice::Shared(_) => panic!("standalone map bound to the store"),
        }
    }

    #[test]
    fn test_embedded_moves_only_touch_store() {
        let mut port = choose_port(false, RecordingPort::default(), Some(RecordingPort::default()));
        assert!(port.is_shared());
        commit_move(&mut port, Coordinates::new(12.0, 34.0), 3.0);
        commit_move(&mut port, Coordinates::new(13.0, 35.0), 3.5);
        match port {
            PortChoice::Shared(store) => {
                assert_eq!(store.calls, ["set_center", "set_zoom", "set_center", "set_zoom"]);
                let state = store.view_state();
                assert_eq!(state.center, Coordinates::new(13.0, 35.0));
                assert_eq!(state.zoom, 3.5);
            }
            PortChoice::Local(_) => panic!("embedded map kept local state"),
        }
    }

    #[test]
    fn test_embedded_without_store_falls_back_to_local() {
        let port: PortChoice<LocalViewState, RecordingPort> =
            choose_port(false, LocalViewState::new(true), None);
        assert!(!port.is_shared());
        assert_eq!(port.view_state(), ViewState::default());
    }

    #[test]
    fn test_commit_move_clamps_zoom() {
        let mut port = LocalViewState::default();
        commit_move(&mut port, Coordinates::ORIGIN, 8.0);
        assert_eq!(port.state.zoom, 8.0);
        commit_move(&mut port, Coordinates::ORIGIN, 1.0);
        assert_eq!(port.state.zoom, 1.0);
        commit_move(&mut port, Coordinates::ORIGIN, 12.0);
        assert_eq!(port.state.zoom, 8.0);
        commit_move(&mut port, Coordinates::ORIGIN, 0.25);
        assert_eq!(port.state.zoom, 1.0);
    }

    #[test]
    fn test_select_country_keeps_visibility() {
        let mut port = LocalViewState::new(false);
        port.select_country(&table().records()[1]);
        assert!(!port.state.show_unselected);
        assert_eq!(port.state.selected_country.as_deref(), Some("Brazil"));
    }

    #[test]
    fn test_embedded_initial_country_goes_to_store() {
        let mut local = RecordingPort::default();
        let mut store = RecordingPort::default();
        let mut port = choose_port(false, &mut local, Some(&mut store));
        assert!(apply_initial_country(&mut port, &table(), "Brazil"));

        assert!(local.calls.is_empty());
        assert_eq!(local.view_state(), ViewState::default());

        assert_eq!(store.calls, ["select_country"]);
        let state = store.view_state();
        assert_eq!(state.selected_country.as_deref(), Some("Brazil"));
        assert_eq!(state.center, Coordinates::new(-51.9, -14.2));
        assert_eq!(state.zoom, 2.5);
    }

    #[test]
    fn test_standalone_initial_country_stays_local() {
        let mut local = RecordingPort::default();
        let mut store = RecordingPort::default();
        let mut port = choose_port(true, &mut local, Some(&mut store));
        assert!(apply_initial_country(&mut port, &table(), "Russia"));

        assert!(store.calls.is_empty());
        assert_eq!(local.calls, ["select_country"]);
        assert_eq!(local.view_state().selected_country.as_deref(), Some("Russia"));
    }
}
