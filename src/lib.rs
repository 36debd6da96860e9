//! PDVs - partner coverage areas and point-in-coverage checks
//!
//! This library provides the coverage geometry core plus the store, seed and
//! HTTP layers shared by the `server` and `check` binaries.

pub mod api;
pub mod config;
pub mod coverage;
pub mod models;
pub mod points;
pub mod seed;
pub mod store;

pub use coverage::{
    check_point, contains, exterior_rings, normalize, CoverageError, ExteriorRings,
    NormalizedGeometry,
};
pub use models::{AddressPoint, CoverageArea, Partner};
