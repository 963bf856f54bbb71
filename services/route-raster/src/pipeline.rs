//! One batch run: load, transform, rasterize, export.

use std::fs;
use std::time::Instant;

use ingestion::{jitter_routes, load_geometries, seeded_rng};
use projection::{PlanarProjection, WebMercator};
use rasterizer::{build_transform, compute_envelope, rasterize_all, RasterizeOptions};
use renderer::{write_geotiff, write_png};
use route_common::{CrsCode, RouteGeometry, SkipTally};
use tracing::{debug, info, warn};

use crate::config::RasterConfig;
use crate::error::PipelineError;
use crate::summary::{JitterSummary, RunSummary};

/// Run the whole pipeline.
///
/// Every fatal condition is detected before the first artifact is
/// written. A failed PNG only downgrades the run to a warning.
pub fn run(config: &RasterConfig) -> Result<RunSummary, PipelineError> {
    let started = Instant::now();
    config.validate()?;

    info!(
        input = %config.input.display(),
        output = %config.output.display(),
        width = config.width,
        height = config.height,
        crs = %config.crs,
        ramp = %config.ramp,
        jitter_m = config.jitter_m,
        workers = config.workers,
        "Starting route rasterization"
    );

    let loaded = load_geometries(&config.input)?;
    if loaded.geometries.is_empty() {
        return Err(PipelineError::NoGeometries {
            path: config.input.clone(),
            features: loaded.feature_count,
            skipped: loaded.skipped.total(),
        });
    }
    let mut geometries = loaded.geometries;

    let mercator = WebMercator::new();

    let jitter = if config.jitter_enabled() {
        let mut rng = seeded_rng(config.seed);
        let (jittered, stats) = jitter_routes(geometries, config.jitter_m, &mut rng, &mercator);
        geometries = jittered;
        Some(JitterSummary {
            radius_m: config.jitter_m,
            seeded: config.seed.is_some(),
            jittered: stats.jittered,
            fallbacks: stats.fallbacks,
        })
    } else {
        None
    };

    let mut reprojection_failures = SkipTally::new();
    if config.crs == CrsCode::Epsg3857 {
        let (projected, failures) = reproject(geometries, &mercator);
        geometries = projected;
        reprojection_failures = failures;
        if geometries.is_empty() {
            return Err(PipelineError::NoGeometries {
                path: config.input.clone(),
                features: loaded.feature_count,
                skipped: loaded.skipped.total() + reprojection_failures.total(),
            });
        }
    }

    let envelope = compute_envelope(&geometries)?;
    let transform = build_transform(&envelope, config.width, config.height)?;
    debug!(?envelope, gdal = ?transform.to_gdal(), "Raster georeferencing");

    let (grid, raster_stats) = rasterize_all(
        &geometries,
        &transform,
        config.width,
        config.height,
        RasterizeOptions::with_workers(config.workers),
    )?;

    write_geotiff(&config.output, &grid, &transform, config.crs)?;

    let png_path = config.png_path();
    let (png, png_error) = match write_png(&png_path, &grid, config.ramp) {
        Ok(()) => (Some(png_path), None),
        Err(e) => {
            warn!(path = %png_path.display(), error = %e, "Failed to write PNG");
            (None, Some(e.to_string()))
        }
    };

    let summary = RunSummary {
        input: config.input.clone(),
        geotiff: config.output.clone(),
        png,
        png_error,
        width: config.width,
        height: config.height,
        crs: config.crs.to_string(),
        ramp: config.ramp.to_string(),
        envelope,
        features: loaded.feature_count,
        geometries: geometries.len(),
        skipped_features: loaded.skipped,
        jitter,
        reprojection_failures,
        rasterized: raster_stats.rasterized,
        raster_skips: raster_stats.skipped,
        nonzero_cells: grid.nonzero_count(),
        max_count: grid.max_value(),
        elapsed_ms: started.elapsed().as_millis() as u64,
    };

    if let Some(path) = &config.summary_path {
        let written = summary
            .to_json()
            .map_err(|e| e.to_string())
            .and_then(|json| fs::write(path, json).map_err(|e| e.to_string()));
        if let Err(e) = written {
            warn!(path = %path.display(), error = %e, "Failed to write run summary");
        }
    }

    Ok(summary)
}

/// Project lon/lat routes into Web Mercator meters. Routes that cannot be
/// projected (beyond the latitude limit) are dropped and tallied.
fn reproject<P: PlanarProjection>(
    geometries: Vec<RouteGeometry>,
    projection: &P,
) -> (Vec<RouteGeometry>, SkipTally) {
    let mut failures = SkipTally::new();
    let mut projected = Vec::with_capacity(geometries.len());

    for (index, geometry) in geometries.iter().enumerate() {
        match geometry.try_map_coords(|(lon, lat)| projection.to_planar(lon, lat)) {
            Ok(planar) => projected.push(planar),
            Err(e) => failures.record("projection_failed", format!("geometry {}: {}", index, e)),
        }
    }

    if !failures.is_empty() {
        debug!(dropped = failures.total(), "Dropped routes outside the projection domain");
    }
    (projected, failures)
}
