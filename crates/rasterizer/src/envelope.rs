//! Raster envelope and geotransform derivation.

use route_common::{BoundingBox, GeoTransform, RouteGeometry};
use tracing::debug;

use crate::{RasterError, Result};

/// Smallest extent (in coordinate units, degrees for EPSG:4326) an envelope
/// axis may have. Narrower axes are widened symmetrically to this size, or
/// to a few ULPs of the axis center when that is larger.
pub const MIN_EXTENT: f64 = 1e-9;

/// Union of the bounds of every geometry.
pub fn compute_envelope(geometries: &[RouteGeometry]) -> Result<BoundingBox> {
    let envelope = geometries
        .iter()
        .filter_map(RouteGeometry::bounds)
        .reduce(|acc, bbox| acc.union(&bbox))
        .ok_or(RasterError::EmptyInput)?;

    if !envelope.is_valid() {
        return Err(RasterError::NonFiniteEnvelope(format!("{:?}", envelope)));
    }
    Ok(envelope)
}

/// Transform mapping `envelope` onto a `width` x `height` grid, north-up.
///
/// A degenerate envelope (a single point, or a perfectly horizontal or
/// vertical route set) is widened to [`MIN_EXTENT`] first.
pub fn build_transform(envelope: &BoundingBox, width: usize, height: usize) -> Result<GeoTransform> {
    let bounds = envelope.with_min_extent(MIN_EXTENT);
    if bounds != *envelope {
        debug!(?envelope, ?bounds, "Widened degenerate envelope");
    }
    Ok(GeoTransform::from_bounds(&bounds, width, height)?)
}
