//! Route rasterization and density accumulation.
//!
//! Turns route geometries into a [`DensityGrid`] where each cell counts the
//! number of distinct routes that touch it.
//!
//! # Architecture
//!
//! ```text
//! &[RouteGeometry]
//!      │
//!      ├─► compute_envelope()      union of all geometry bounds
//!      │
//!      ├─► build_transform()       envelope → north-up pixel transform
//!      │
//!      ├─► rasterize_line()        per geometry, all-touched CoverageMask
//!      │         │                 (rayon workers when parallel)
//!      │         ▼
//!      └─► accumulate()            +1 per masked cell, per-worker grids
//!                │                 merged by saturating addition
//!                ▼
//!           DensityGrid
//! ```
//!
//! [`DensityGrid`]: route_common::DensityGrid

pub mod accumulate;
pub mod coverage;
pub mod envelope;
pub mod error;

pub use accumulate::{accumulate, rasterize_all, RasterizeOptions, RasterizeStats};
pub use coverage::{rasterize_line, CoverageMask, RasterSkip, RasterizeOutcome};
pub use envelope::{build_transform, compute_envelope, MIN_EXTENT};
pub use error::{RasterError, Result};
