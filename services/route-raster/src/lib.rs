//! Route density rasterizer service library.
//!
//! Wires the workspace crates into one batch run:
//!
//! ```text
//! GeoJSON ─► load ─► [jitter] ─► [reproject] ─► envelope ─► rasterize
//!                                                              │
//!                                     GeoTIFF (fatal on error) ◄┤
//!                                     PNG (warning on error)   ◄┘
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod summary;

pub use config::{CliArgs, ConfigError, RasterConfig};
pub use error::PipelineError;
pub use pipeline::run;
pub use summary::{JitterSummary, RunSummary};
