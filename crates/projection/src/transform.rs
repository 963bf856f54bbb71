//! Transform seam between geographic and planar coordinates.

use crate::ProjectionError;

/// A pair of forward/inverse transforms between geographic coordinates
/// (longitude, latitude in degrees) and a planar, meter-based system.
pub trait PlanarProjection {
    /// Geographic (lon, lat) to planar (x, y) meters.
    fn to_planar(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjectionError>;

    /// Planar (x, y) meters to geographic (lon, lat).
    fn to_geographic(&self, x: f64, y: f64) -> Result<(f64, f64), ProjectionError>;
}

impl<P: PlanarProjection + ?Sized> PlanarProjection for &P {
    fn to_planar(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjectionError> {
        (**self).to_planar(lon, lat)
    }

    fn to_geographic(&self, x: f64, y: f64) -> Result<(f64, f64), ProjectionError> {
        (**self).to_geographic(x, y)
    }
}
