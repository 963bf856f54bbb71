//! Common types and utilities shared across the route density workspace.
//!
//! Everything here is plain data: route geometries, bounding boxes, the
//! geographic-to-pixel transform and the density grid the rasterizer
//! fills and the renderer reads.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod geometry;
pub mod geotransform;
pub mod grid;
pub mod tally;

pub use bbox::BoundingBox;
pub use crs::{CrsCode, CrsParseError};
pub use error::{RouteError, RouteResult};
pub use geometry::{Coord, RouteGeometry};
pub use geotransform::GeoTransform;
pub use grid::DensityGrid;
pub use tally::SkipTally;
