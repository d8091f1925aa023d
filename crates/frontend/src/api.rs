use std::rc::Rc;

use dioxus::prelude::*;
use worldmap_shared::countries::CountryTable;
use worldmap_shared::models::{CountryRecord, GeographyFeature};
use worldmap_shared::projection;
use worldmap_shared::topo::{Topology, COUNTRIES_OBJECT};
use worldmap_shared::MapError;

const DEFAULT_GEO_URL: &str = "https://cdn.jsdelivr.net/npm/world-atlas@2/countries-110m.json";

const COUNTRIES_DATA: Asset = asset!("/assets/countries.json");

/// Geometry document URL, overridable at build time with `WORLDMAP_GEO_URL`.
pub fn geo_url() -> &'static str {
    option_env!("WORLDMAP_GEO_URL").unwrap_or(DEFAULT_GEO_URL)
}

/// Resolve a served asset path against the page origin.
pub fn absolute_url(origin: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn page_origin() -> Result<String, MapError> {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .ok_or(MapError::NoWindow)
}

async fn get(url: &str) -> Result<reqwest::Response, MapError> {
    let fetch_err = |e: reqwest::Error| MapError::Fetch {
        url: url.to_string(),
        reason: e.to_string(),
    };
    reqwest::Client::new()
        .get(url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(fetch_err)
}

/// A country shape ready to draw: its SVG path at zoom 1.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionShape {
    pub key: String,
    pub name: String,
    pub d: Rc<str>,
}

impl From<&GeographyFeature> for RegionShape {
    fn from(feature: &GeographyFeature) -> Self {
        Self {
            key: feature.key.clone(),
            name: feature.name.clone(),
            d: projection::rings_to_path(&feature.rings).into(),
        }
    }
}

/// Fetch the world geometry and project every country once.
pub async fn fetch_regions() -> Result<Vec<RegionShape>, MapError> {
    let url = geo_url();
    let topology: Topology = get(url)
        .await?
        .json()
        .await
        .map_err(|e| MapError::decode("topology", e))?;
    let features = topology.features(COUNTRIES_OBJECT)?;
    tracing::info!(features = features.len(), "Loaded world geometry");
    Ok(features.iter().map(RegionShape::from).collect())
}

/// Fetch the bundled country lookup table.
pub async fn fetch_countries() -> Result<CountryTable, MapError> {
    let url = absolute_url(&page_origin()?, &COUNTRIES_DATA.to_string());
    let records: Vec<CountryRecord> = get(&url)
        .await?
        .json()
        .await
        .map_err(|e| MapError::decode("country table", e))?;
    tracing::info!(countries = records.len(), "Loaded country table");
    Ok(CountryTable::new(records))
}
