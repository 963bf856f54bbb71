//! Error types for rasterization.

use route_common::RouteError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("No geometries to rasterize")]
    EmptyInput,

    #[error("Envelope is not finite: {0}")]
    NonFiniteEnvelope(String),

    #[error("Invalid raster transform: {0}")]
    InvalidTransform(#[from] RouteError),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
}
