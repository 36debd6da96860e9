//! Conversion of raw coverage documents into validated geometry.

use geo::{Coord, Geometry, LineString, MultiPolygon, Polygon};
use serde_json::Value;

use super::CoverageError;
use crate::models::coverage::{CoverageArea, MULTI_POLYGON, POLYGON};

/// Minimum number of vertices a ring must carry, not counting the closing point
pub const MIN_RING_POINTS: usize = 3;

/// Coverage geometry ready for containment checks.
///
/// Every ring is closed and holds at least [`MIN_RING_POINTS`] vertices plus
/// the repeated closing point.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedGeometry {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl NormalizedGeometry {
    /// Geometry tag as used in coverage documents
    pub fn type_name(&self) -> &'static str {
        match self {
            NormalizedGeometry::Polygon(_) => POLYGON,
            NormalizedGeometry::MultiPolygon(_) => MULTI_POLYGON,
        }
    }

    /// Number of member polygons (1 for a plain polygon)
    pub fn polygon_count(&self) -> usize {
        match self {
            NormalizedGeometry::Polygon(_) => 1,
            NormalizedGeometry::MultiPolygon(mp) => mp.0.len(),
        }
    }
}

impl TryFrom<Geometry<f64>> for NormalizedGeometry {
    type Error = CoverageError;

    /// Accept geometry built natively with `geo`, re-checking ring structure.
    fn try_from(geometry: Geometry<f64>) -> Result<Self, Self::Error> {
        match geometry {
            Geometry::Polygon(polygon) => {
                check_polygon(&polygon)?;
                Ok(NormalizedGeometry::Polygon(polygon))
            }
            Geometry::MultiPolygon(mp) => {
                if mp.0.is_empty() {
                    return Err(CoverageError::malformed("multi-polygon has no members"));
                }
                for polygon in &mp.0 {
                    check_polygon(polygon)?;
                }
                Ok(NormalizedGeometry::MultiPolygon(mp))
            }
            other => Err(CoverageError::UnsupportedGeometryType(
                geometry_name(&other).to_string(),
            )),
        }
    }
}

/// Normalize a stored coverage area.
///
/// The `type` tag selects the parsing path. Coordinate values may be JSON
/// numbers or numeric strings; open rings are closed.
pub fn normalize(coverage: &CoverageArea) -> Result<NormalizedGeometry, CoverageError> {
    match coverage.geo_type.as_str() {
        POLYGON => polygon_from_rings(&coverage.coordinates).map(NormalizedGeometry::Polygon),
        MULTI_POLYGON => {
            let members = as_array(&coverage.coordinates, "multi-polygon coordinates")?;
            if members.is_empty() {
                return Err(CoverageError::malformed("multi-polygon has no members"));
            }

            let polygons = members
                .iter()
                .enumerate()
                .map(|(i, member)| {
                    polygon_from_rings(member).map_err(|e| match e {
                        CoverageError::MalformedGeometry(msg) => {
                            CoverageError::malformed(format!("polygon {}: {}", i, msg))
                        }
                        other => other,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            Ok(NormalizedGeometry::MultiPolygon(MultiPolygon::new(polygons)))
        }
        other => Err(CoverageError::UnsupportedGeometryType(other.to_string())),
    }
}

/// Build a polygon from a ring list: element 0 is the exterior, the rest are holes
fn polygon_from_rings(value: &Value) -> Result<Polygon<f64>, CoverageError> {
    let rings = as_array(value, "polygon rings")?;
    let (exterior, holes) = rings
        .split_first()
        .ok_or_else(|| CoverageError::malformed("polygon has no rings"))?;

    let exterior = ring_from_value(exterior).map_err(|e| in_ring(e, 0))?;
    let interiors = holes
        .iter()
        .enumerate()
        .map(|(i, hole)| ring_from_value(hole).map_err(|e| in_ring(e, i + 1)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Polygon::new(exterior, interiors))
}

fn ring_from_value(value: &Value) -> Result<LineString<f64>, CoverageError> {
    let mut coords = as_array(value, "ring")?
        .iter()
        .enumerate()
        .map(|(i, pair)| {
            coord_from_value(pair)
                .map_err(|msg| CoverageError::malformed(format!("point {}: {}", i, msg)))
        })
        .collect::<Result<Vec<Coord<f64>>, _>>()?;

    // Close the ring if needed
    if !coords.is_empty() && coords.first() != coords.last() {
        coords.push(coords[0]);
    }

    let ring = LineString::new(coords);
    check_ring_length(&ring)?;
    Ok(ring)
}

/// A closed ring needs [`MIN_RING_POINTS`] vertices plus the closing point
fn check_ring_length(ring: &LineString<f64>) -> Result<(), CoverageError> {
    let vertices = ring.0.len().saturating_sub(1);
    if vertices < MIN_RING_POINTS {
        return Err(CoverageError::malformed(format!(
            "ring has {} vertices, at least {} required",
            vertices, MIN_RING_POINTS
        )));
    }
    Ok(())
}

fn coord_from_value(value: &Value) -> Result<Coord<f64>, String> {
    match value.as_array().map(Vec::as_slice) {
        Some([x, y]) => Ok(Coord {
            x: coerce_f64(x)?,
            y: coerce_f64(y)?,
        }),
        Some(other) => Err(format!("expected 2 values, got {}", other.len())),
        None => Err(format!("expected coordinate pair, got {}", value)),
    }
}

/// Coerce a JSON number or numeric string to f64
fn coerce_f64(value: &Value) -> Result<f64, String> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| format!("number {} is not representable as f64", n)),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            Ok(_) => Err(format!("{:?} is not a finite number", s)),
            Err(_) => Err(format!("{:?} is not a number", s)),
        },
        other => Err(format!("{} is not a number", other)),
    }
}

fn as_array<'a>(value: &'a Value, what: &str) -> Result<&'a Vec<Value>, CoverageError> {
    value
        .as_array()
        .ok_or_else(|| CoverageError::malformed(format!("{} must be an array", what)))
}

fn in_ring(error: CoverageError, ring: usize) -> CoverageError {
    match error {
        CoverageError::MalformedGeometry(msg) => {
            CoverageError::malformed(format!("ring {}: {}", ring, msg))
        }
        other => other,
    }
}

fn check_polygon(polygon: &Polygon<f64>) -> Result<(), CoverageError> {
    for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
        check_ring_length(ring)?;
        if !ring.is_closed() {
            return Err(CoverageError::malformed("ring is not closed"));
        }
    }
    Ok(())
}

fn geometry_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => POLYGON,
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => MULTI_POLYGON,
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
