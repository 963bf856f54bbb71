//! End-of-run summary.

use std::path::PathBuf;

use route_common::{BoundingBox, SkipTally};
use serde::Serialize;
use tracing::{info, warn};

/// Jitter pass results.
#[derive(Debug, Clone, Serialize)]
pub struct JitterSummary {
    pub radius_m: f64,
    pub seeded: bool,
    pub jittered: usize,
    /// Geometries kept at their original position because projection failed
    pub fallbacks: SkipTally,
}

/// Everything a run produced and everything it had to skip.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub input: PathBuf,
    pub geotiff: PathBuf,
    /// Set when the PNG was written
    pub png: Option<PathBuf>,
    /// Set when the PNG could not be written
    pub png_error: Option<String>,
    pub width: usize,
    pub height: usize,
    pub crs: String,
    pub ramp: String,
    pub envelope: BoundingBox,
    /// Features in the input collection
    pub features: usize,
    /// Geometries that reached the rasterizer
    pub geometries: usize,
    pub skipped_features: SkipTally,
    pub jitter: Option<JitterSummary>,
    pub reprojection_failures: SkipTally,
    pub rasterized: usize,
    pub raster_skips: SkipTally,
    pub nonzero_cells: usize,
    pub max_count: u32,
    pub elapsed_ms: u64,
}

impl RunSummary {
    /// Log the summary once, plus the sampled diagnostics of every
    /// non-empty skip category.
    pub fn log(&self) {
        let categories = [
            ("feature", Some(&self.skipped_features)),
            ("jitter", self.jitter.as_ref().map(|j| &j.fallbacks)),
            ("reprojection", Some(&self.reprojection_failures)),
            ("raster", Some(&self.raster_skips)),
        ];
        for (stage, tally) in categories {
            let Some(tally) = tally else { continue };
            for sample in tally.samples() {
                warn!(stage, total = tally.total(), "{}", sample);
            }
        }

        if let Some(err) = &self.png_error {
            warn!(error = %err, "PNG visualization was not written");
        }

        info!(
            input = %self.input.display(),
            geotiff = %self.geotiff.display(),
            png = ?self.png,
            width = self.width,
            height = self.height,
            crs = %self.crs,
            ramp = %self.ramp,
            features = self.features,
            geometries = self.geometries,
            skipped_features = self.skipped_features.total(),
            jitter_fallbacks = self.jitter.as_ref().map_or(0, |j| j.fallbacks.total()),
            rasterized = self.rasterized,
            raster_skips = self.raster_skips.total(),
            nonzero_cells = self.nonzero_cells,
            max_count = self.max_count,
            elapsed_ms = self.elapsed_ms,
            "Route rasterization complete"
        );
    }

    /// Pretty-printed JSON form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
