//! Density accumulation over a batch of routes.

use rayon::prelude::*;
use route_common::{DensityGrid, GeoTransform, RouteGeometry, SkipTally};
use serde::Serialize;
use tracing::{debug, info};

use crate::coverage::{rasterize_line, CoverageMask, RasterizeOutcome};
use crate::{RasterError, Result};

/// Add one to every cell of the mask.
///
/// Masks are de-duplicated, so a geometry contributes at most 1 per cell.
pub fn accumulate(grid: &mut DensityGrid, mask: &CoverageMask) {
    grid.increment_cells(mask.indices());
}

/// Options for [`rasterize_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterizeOptions {
    /// Worker threads: 1 runs sequentially, 0 uses the rayon default pool.
    pub workers: usize,
}

impl RasterizeOptions {
    pub fn sequential() -> Self {
        Self { workers: 1 }
    }

    pub fn with_workers(workers: usize) -> Self {
        Self { workers }
    }
}

/// Counts from a rasterization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RasterizeStats {
    /// Geometries that contributed to the grid
    pub rasterized: usize,
    /// Geometries that produced no coverage, by reason
    pub skipped: SkipTally,
}

impl RasterizeStats {
    fn absorb(&mut self, other: RasterizeStats) {
        self.rasterized += other.rasterized;
        self.skipped.merge(other.skipped);
    }
}

/// Grid plus stats owned by one worker.
struct Partial {
    grid: DensityGrid,
    stats: RasterizeStats,
}

impl Partial {
    fn new(grid: DensityGrid) -> Self {
        Self {
            grid,
            stats: RasterizeStats::default(),
        }
    }

    fn add(mut self, index: usize, geometry: &RouteGeometry, transform: &GeoTransform) -> Self {
        let (width, height) = (self.grid.width(), self.grid.height());
        match rasterize_line(geometry, transform, width, height) {
            RasterizeOutcome::Covered(mask) => {
                accumulate(&mut self.grid, &mask);
                self.stats.rasterized += 1;
            }
            RasterizeOutcome::Skipped(reason) => {
                self.stats
                    .skipped
                    .record(reason.label(), format!("geometry {}: {}", index, reason));
            }
        }
        self
    }

    fn merge(mut self, other: Partial) -> Result<Self> {
        self.grid.merge(&other.grid)?;
        self.stats.absorb(other.stats);
        Ok(self)
    }
}

/// Rasterize every geometry and accumulate into a fresh `width` x `height`
/// grid.
///
/// The parallel path folds into per-worker grids and merges them by
/// saturating addition; its result is identical to the sequential path.
pub fn rasterize_all(
    geometries: &[RouteGeometry],
    transform: &GeoTransform,
    width: usize,
    height: usize,
    options: RasterizeOptions,
) -> Result<(DensityGrid, RasterizeStats)> {
    let empty = DensityGrid::new(width, height)?;

    let partial = match options.workers {
        1 => sequential(geometries, transform, empty),
        0 => parallel(geometries, transform, &empty)?,
        workers => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()
                .map_err(|e| RasterError::ThreadPool(e.to_string()))?;
            pool.install(|| parallel(geometries, transform, &empty))?
        }
    };

    let Partial { grid, stats } = partial;
    if !stats.skipped.is_empty() {
        debug!(samples = ?stats.skipped.samples(), "Geometries produced no coverage");
    }
    info!(
        geometries = geometries.len(),
        rasterized = stats.rasterized,
        skipped = stats.skipped.total(),
        nonzero_cells = grid.nonzero_count(),
        max_count = grid.max_value(),
        workers = options.workers,
        "Rasterized routes"
    );

    Ok((grid, stats))
}

fn sequential(geometries: &[RouteGeometry], transform: &GeoTransform, grid: DensityGrid) -> Partial {
    geometries
        .iter()
        .enumerate()
        .fold(Partial::new(grid), |partial, (index, geometry)| {
            partial.add(index, geometry, transform)
        })
}

fn parallel(
    geometries: &[RouteGeometry],
    transform: &GeoTransform,
    empty: &DensityGrid,
) -> Result<Partial> {
    geometries
        .par_iter()
        .enumerate()
        .fold(
            || Partial::new(empty.clone()),
            |partial, (index, geometry)| partial.add(index, geometry, transform),
        )
        .map(Ok)
        .try_reduce(|| Partial::new(empty.clone()), Partial::merge)
}
