//! Projection errors.

use thiserror::Error;

/// Errors raised when a coordinate cannot be projected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProjectionError {
    /// Input coordinate is NaN or infinite.
    #[error("non-finite coordinate ({x}, {y})")]
    NonFinite { x: f64, y: f64 },

    /// Latitude outside the range the projection can represent.
    #[error("latitude {lat} outside projectable range ±{limit}")]
    LatitudeOutOfRange { lat: f64, limit: f64 },

    /// Projected or inverse result is NaN or infinite.
    #[error("projection produced a non-finite result for ({x}, {y})")]
    Singular { x: f64, y: f64 },
}
