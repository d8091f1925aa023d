use serde::{Deserialize, Serialize};

/// Geographic coordinate in degrees. Serialized as `[lon, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinates {
    pub const ORIGIN: Coordinates = Coordinates { lon: 0.0, lat: 0.0 };

    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lon, c.lat]
    }
}

/// Selection, pan/zoom and visibility of one map view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub selected_country: Option<String>,
    pub center: Coordinates,
    pub zoom: f64,
    pub show_unselected: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            selected_country: None,
            center: Coordinates::ORIGIN,
            zoom: 1.0,
            show_unselected: true,
        }
    }
}

impl ViewState {
    /// Fresh state with the given visibility for unselected regions.
    pub fn with_show_unselected(show_unselected: bool) -> Self {
        Self {
            show_unselected,
            ..Self::default()
        }
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected_country.as_deref() == Some(name)
    }
}

/// One entry of the country lookup table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub value: String,
    pub coordinates: Coordinates,
    pub zoom: f64,
}

/// Pointer position in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One country shape from the geometry document.
///
/// `name` is the join key against `ViewState::selected_country`; `key` is
/// unique within one decoded document.
#[derive(Debug, Clone, PartialEq)]
pub struct GeographyFeature {
    pub key: String,
    pub name: String,
    pub rings: Vec<Vec<Coordinates>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipState {
    pub content: String,
    pub position: ScreenPoint,
}
