//! Error types for route geometry and grid construction.

use thiserror::Error;

/// Result type alias using RouteError.
pub type RouteResult<T> = Result<T, RouteError>;

/// Errors raised while constructing common route types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RouteError {
    // === Geometry Errors ===
    #[error("Line has {0} vertices, at least 2 are required")]
    TooFewVertices(usize),

    #[error("Multi-line has no parts")]
    NoParts,

    #[error("Non-finite coordinate ({x}, {y})")]
    NonFiniteCoordinate { x: f64, y: f64 },

    // === Grid Errors ===
    #[error("Invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Invalid bounding box: {0}")]
    InvalidBbox(String),
}
