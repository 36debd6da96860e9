//! Partner coverage geometry.
//!
//! Normalizes stored coverage areas into `geo` polygons and answers
//! point-in-coverage queries against them. Everything here is pure and
//! safe to call from any number of threads.

mod containment;
mod error;
mod normalize;

pub use containment::{contains, exterior_rings, ExteriorRings};
pub use error::CoverageError;
pub use normalize::{normalize, NormalizedGeometry, MIN_RING_POINTS};

use geo::Point;
use tracing::debug;

use crate::models::CoverageArea;

/// Normalize a coverage area and test a single point against it
pub fn check_point(coverage: &CoverageArea, point: Point<f64>) -> Result<bool, CoverageError> {
    let geometry = normalize(coverage)?;
    let inside = contains(&geometry, point);

    debug!(
        "Coverage check at ({}, {}) against {} with {} polygon(s): {}",
        point.x(),
        point.y(),
        geometry.type_name(),
        geometry.polygon_count(),
        inside
    );

    Ok(inside)
}

/// Normalize a coverage area and return its exterior ring(s)
pub fn coverage_exterior(coverage: &CoverageArea) -> Result<ExteriorRings, CoverageError> {
    normalize(coverage).map(|geometry| exterior_rings(&geometry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::point;

    #[test]
    fn test_check_point_on_raw_coverage() {
        let coverage = CoverageArea::polygon(&[[0.0, 0.0], [0.0, 4.0], [4.0, 4.0], [4.0, 0.0], [0.0, 0.0]]);
        assert_eq!(check_point(&coverage, point! { x: 2.0, y: 2.0 }), Ok(true));
        assert_eq!(check_point(&coverage, point! { x: 5.0, y: 5.0 }), Ok(false));
    }

    #[test]
    fn test_check_point_propagates_errors() {
        let coverage = CoverageArea::new("Triangle", serde_json::json!([]));
        assert_eq!(
            check_point(&coverage, point! { x: 0.0, y: 0.0 }),
            Err(CoverageError::UnsupportedGeometryType("Triangle".into()))
        );
    }

    #[test]
    fn test_coverage_exterior_length() {
        let ring = [[0.0, 0.0], [1.0, 3.0], [3.0, 3.0], [4.0, 1.0], [2.0, -1.0], [0.0, 0.0]];
        let rings = coverage_exterior(&CoverageArea::polygon(&ring)).unwrap();
        let ExteriorRings::Polygon(exterior) = rings else {
            panic!("expected polygon ring");
        };
        assert_eq!(exterior.len(), ring.len() - 1);
        assert_eq!(exterior.last(), Some(&point! { x: 2.0, y: -1.0 }));
    }

    #[test]
    fn test_geometry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NormalizedGeometry>();
        assert_send_sync::<ExteriorRings>();
    }
}
