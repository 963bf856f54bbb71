//! Coordinate reference system transformations.
//!
//! Implements map projections from scratch without external dependencies.
//! Only the pieces the route pipeline needs live here: a planar,
//! meter-based projection used to displace vertices by a distance.

pub mod error;
pub mod mercator;
pub mod transform;

pub use error::ProjectionError;
pub use mercator::WebMercator;
pub use transform::PlanarProjection;
