//! Fatal pipeline errors.

use std::path::PathBuf;

use ingestion::IngestionError;
use rasterizer::RasterError;
use renderer::RenderError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ingest(#[from] IngestionError),

    #[error("No usable route geometries in {path} ({features} features, {skipped} skipped)")]
    NoGeometries {
        path: PathBuf,
        features: usize,
        skipped: usize,
    },

    #[error("Rasterization failed: {0}")]
    Raster(#[from] RasterError),

    #[error("GeoTIFF export failed: {0}")]
    Export(#[from] RenderError),
}
