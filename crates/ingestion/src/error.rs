//! Error types for the ingestion crate.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort loading.
///
/// Per-feature problems that can be skipped are reported through
/// [`FeatureOutcome`](crate::FeatureOutcome) instead.
#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Invalid GeoJSON document: {0}")]
    InvalidDocument(String),

    #[error("Feature {feature_index} has unsupported geometry type '{geometry_type}' (expected LineString or MultiLineString)")]
    UnsupportedGeometry {
        feature_index: usize,
        geometry_type: String,
    },
}

impl From<serde_json::Error> for IngestionError {
    fn from(err: serde_json::Error) -> Self {
        IngestionError::InvalidDocument(err.to_string())
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestionError>;
