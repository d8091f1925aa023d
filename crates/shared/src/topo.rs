//! TopoJSON decoding.
//!
//! Only what a country outline map needs: quantized, delta-encoded arcs and
//! Polygon/MultiPolygon geometries inside a GeometryCollection. Other
//! geometry types are skipped.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::MapError;
use crate::models::{Coordinates, GeographyFeature};

/// Name of the object holding country shapes in world-atlas documents.
pub const COUNTRIES_OBJECT: &str = "countries";

#[derive(Debug, Clone, Deserialize)]
pub struct Topology {
    pub objects: HashMap<String, TopoObject>,
    pub arcs: Vec<Vec<Vec<f64>>>,
    #[serde(default)]
    pub transform: Option<Transform>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopoObject {
    #[serde(default)]
    pub geometries: Vec<TopoGeometry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopoGeometry {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub arcs: serde_json::Value,
    #[serde(default)]
    pub properties: Option<GeometryProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeometryProperties {
    #[serde(default)]
    pub name: Option<String>,
}

impl Topology {
    pub fn from_json(data: &str) -> Result<Self, MapError> {
        serde_json::from_str(data).map_err(|e| MapError::decode("topology", e))
    }

    /// Absolute coordinates of every arc, undoing quantization.
    fn decoded_arcs(&self) -> Result<Vec<Vec<Coordinates>>, MapError> {
        self.arcs
            .iter()
            .enumerate()
            .map(|(i, arc)| {
                let (mut x, mut y) = (0.0, 0.0);
                arc.iter()
                    .map(|pos| {
                        let [px, py] = match pos.as_slice() {
                            [px, py, ..] => [*px, *py],
                            _ => {
                                return Err(MapError::InvalidTopology(format!(
                                    "arc {i} has a position with fewer than two values"
                                )))
                            }
                        };
                        Ok(match self.transform {
                            Some(t) => {
                                x += px;
                                y += py;
                                Coordinates::new(
                                    x * t.scale[0] + t.translate[0],
                                    y * t.scale[1] + t.translate[1],
                                )
                            }
                            None => Coordinates::new(px, py),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect()
    }

    /// Decode every polygonal geometry of `object` into features.
    pub fn features(&self, object: &str) -> Result<Vec<GeographyFeature>, MapError> {
        let obj = self
            .objects
            .get(object)
            .ok_or_else(|| MapError::InvalidTopology(format!("no object named {object:?}")))?;
        let arcs = self.decoded_arcs()?;

        let mut features = Vec::with_capacity(obj.geometries.len());
        for (i, geometry) in obj.geometries.iter().enumerate() {
            let polygons: Vec<Vec<Vec<i64>>> = match geometry.kind.as_deref() {
                Some("Polygon") => vec![parse_arcs(&geometry.arcs, i)?],
                Some("MultiPolygon") => parse_arcs(&geometry.arcs, i)?,
                other => {
                    tracing::debug!(index = i, kind = ?other, "skipping non-polygon geometry");
                    continue;
                }
            };

            let rings = polygons
                .iter()
                .flatten()
                .map(|ring| stitch_ring(&arcs, ring))
                .collect::<Result<Vec<_>, _>>()?;

            let name = geometry
                .properties
                .as_ref()
                .and_then(|p| p.name.clone())
                .unwrap_or_default();

            features.push(GeographyFeature {
                key: format!("geo-{i}"),
                name,
                rings,
            });
        }
        Ok(features)
    }
}

fn parse_arcs<T: serde::de::DeserializeOwned>(value: &serde_json::Value, index: usize) -> Result<T, MapError> {
    T::deserialize(value)
        .map_err(|e| MapError::InvalidTopology(format!("geometry {index} has malformed arcs: {e}")))
}

/// Join arcs into one ring. Negative indices walk arc `!i` backwards.
fn stitch_ring(arcs: &[Vec<Coordinates>], refs: &[i64]) -> Result<Vec<Coordinates>, MapError> {
    let mut ring: Vec<Coordinates> = Vec::new();
    for &r in refs {
        let (idx, reversed) = if r >= 0 { (r, false) } else { (!r, true) };
        let arc = usize::try_from(idx)
            .ok()
            .and_then(|i| arcs.get(i))
            .ok_or_else(|| MapError::InvalidTopology(format!("arc index {r} out of range")))?;

        let points: Box<dyn Iterator<Item = &Coordinates>> = if reversed {
            Box::new(arc.iter().rev())
        } else {
            Box::new(arc.iter())
        };
        // Consecutive arcs share their joining point.
        let skip = usize::from(!ring.is_empty());
        ring.extend(points.skip(skip).copied());
    }
    Ok(ring)
}
