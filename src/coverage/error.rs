//! Error types for coverage normalization.

use thiserror::Error;

/// Errors raised while turning a stored coverage area into geometry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoverageError {
    /// The coordinates do not have the shape required by the geometry tag.
    #[error("Malformed geometry: {0}")]
    MalformedGeometry(String),

    /// The geometry tag is neither `Polygon` nor `MultiPolygon`.
    #[error("Unsupported geometry type: {0:?}")]
    UnsupportedGeometryType(String),
}

impl CoverageError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        CoverageError::MalformedGeometry(message.into())
    }
}
