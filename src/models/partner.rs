//! Partner (PDV) document structure.

use serde::{Deserialize, Serialize};

use super::CoverageArea;

/// Geographic point in GeoJSON form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AddressPoint {
    #[serde(rename = "type", default = "AddressPoint::point_type")]
    pub geo_type: PointType,
    /// [lon, lat]
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointType {
    Point,
}

impl AddressPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            geo_type: PointType::Point,
            coordinates: [lon, lat],
        }
    }

    fn point_type() -> PointType {
        PointType::Point
    }

    pub fn lon(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn lat(&self) -> f64 {
        self.coordinates[1]
    }
}

/// A partner point of sale and the area it serves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: String,
    pub trading_name: String,
    pub owner_name: String,
    /// Legal document id (CNPJ)
    pub document: String,
    pub coverage_area: CoverageArea,
    pub address: AddressPoint,
}
