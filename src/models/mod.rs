//! Partner and coverage document models.

pub mod coverage;
pub mod partner;

pub use coverage::CoverageArea;
pub use partner::{AddressPoint, Partner, PointType};
