//! Output rendering for route density grids.
//!
//! Two artifacts are produced from one finalized [`DensityGrid`]:
//! - **GeoTIFF** ([`geotiff`]): lossless single-band `u32` counts with
//!   georeferencing tags. This is the artifact of record.
//! - **PNG** ([`equalize`], [`colormap`], [`png`]): counts remapped through
//!   their empirical CDF and colored with a named ramp, for viewing.
//!
//! [`DensityGrid`]: route_common::DensityGrid

pub mod colormap;
pub mod equalize;
pub mod error;
pub mod geotiff;
pub mod png;

pub use colormap::{ColorRamp, ParseRampError, Rgb};
pub use equalize::{equalize, render_equalized, EqualizationCurve};
pub use error::{RenderError, Result};
pub use geotiff::{encode_geotiff, write_geotiff};
pub use png::{create_png_rgb, render_png, write_png};
