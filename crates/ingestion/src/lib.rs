//! Route geometry ingestion.
//!
//! Turns a GeoJSON feature collection into typed [`RouteGeometry`] values
//! and optionally displaces their vertices for positional obfuscation.
//!
//! # Architecture
//!
//! - [`geojson`]: geometry object parsing (LineString / MultiLineString)
//! - [`loader`]: feature collection loading with per-feature outcomes
//! - [`jitter`]: bounded random vertex displacement in a planar projection
//!
//! Features that cannot be used are skipped and tallied; a geometry of an
//! unsupported type aborts the load.
//!
//! [`RouteGeometry`]: route_common::RouteGeometry

pub mod error;
pub mod geojson;
pub mod jitter;
pub mod loader;

// Re-exports
pub use error::{IngestionError, Result};
pub use jitter::{jitter_geometry, jitter_routes, seeded_rng, JitterOutcome, JitterStats};
pub use loader::{
    load_from_str, load_geometries, parse_feature, FeatureOutcome, LoadedRoutes, SkipReason,
};
