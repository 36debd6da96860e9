//! Point containment and exterior ring extraction.

use geo::{Intersects, Point, Polygon};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::NormalizedGeometry;
use crate::models::coverage::{MULTI_POLYGON, POLYGON};

/// Check whether a point lies inside or on the boundary of a geometry.
///
/// Points inside a hole are excluded, points on a hole's boundary are not.
/// For a multi-polygon any member containing the point is enough.
pub fn contains(geometry: &NormalizedGeometry, point: Point<f64>) -> bool {
    match geometry {
        NormalizedGeometry::Polygon(polygon) => polygon_covers(polygon, point),
        NormalizedGeometry::MultiPolygon(mp) => mp.iter().any(|p| polygon_covers(p, point)),
    }
}

// Closed containment: `Intersects` is true for interior and boundary alike.
fn polygon_covers(polygon: &Polygon<f64>, point: Point<f64>) -> bool {
    polygon.intersects(&point.0)
}

/// Exterior ring(s) of a coverage geometry without the closing point
#[derive(Debug, Clone, PartialEq)]
pub enum ExteriorRings {
    Polygon(Vec<Point<f64>>),
    /// One ring per member polygon
    MultiPolygon(Vec<Vec<Point<f64>>>),
}

impl Serialize for ExteriorRings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ExteriorRings", 2)?;
        match self {
            ExteriorRings::Polygon(ring) => {
                state.serialize_field("type", POLYGON)?;
                state.serialize_field("coordinates", &positions(ring))?;
            }
            ExteriorRings::MultiPolygon(rings) => {
                let coordinates: Vec<Vec<[f64; 2]>> =
                    rings.iter().map(|ring| positions(ring)).collect();
                state.serialize_field("type", MULTI_POLYGON)?;
                state.serialize_field("coordinates", &coordinates)?;
            }
        }
        state.end()
    }
}

fn positions(ring: &[Point<f64>]) -> Vec<[f64; 2]> {
    ring.iter().map(|p| [p.x(), p.y()]).collect()
}

/// Extract the exterior ring(s), dropping the duplicated closing vertex
pub fn exterior_rings(geometry: &NormalizedGeometry) -> ExteriorRings {
    match geometry {
        NormalizedGeometry::Polygon(polygon) => ExteriorRings::Polygon(open_exterior(polygon)),
        NormalizedGeometry::MultiPolygon(mp) => {
            ExteriorRings::MultiPolygon(mp.iter().map(open_exterior).collect())
        }
    }
}

fn open_exterior(polygon: &Polygon<f64>) -> Vec<Point<f64>> {
    let exterior = polygon.exterior();
    let open_len = exterior.0.len().saturating_sub(1);
    exterior.points().take(open_len).collect()
}
