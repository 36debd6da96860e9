//! Coverage area document as stored alongside a partner.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Geometry tag of a polygon coverage
pub const POLYGON: &str = "Polygon";
/// Geometry tag of a multi-polygon coverage
pub const MULTI_POLYGON: &str = "MultiPolygon";

/// Raw coverage area (GeoJSON-like).
///
/// Coordinates are kept loosely typed: seed documents and API clients may send
/// numbers or numeric strings. They only become real geometry once passed
/// through [`crate::coverage::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageArea {
    #[serde(rename = "type")]
    pub geo_type: String,
    pub coordinates: Value,
}

impl CoverageArea {
    pub fn new(geo_type: impl Into<String>, coordinates: Value) -> Self {
        Self {
            geo_type: geo_type.into(),
            coordinates,
        }
    }

    /// Build a single-ring polygon coverage from `[lon, lat]` pairs
    pub fn polygon(ring: &[[f64; 2]]) -> Self {
        Self::new(POLYGON, serde_json::json!([ring]))
    }

    /// Build a multi-polygon coverage with one exterior ring per member
    pub fn multi_polygon(rings: &[Vec<[f64; 2]>]) -> Self {
        let members: Vec<Value> = rings.iter().map(|r| serde_json::json!([r])).collect();
        Self::new(MULTI_POLYGON, Value::Array(members))
    }
}
