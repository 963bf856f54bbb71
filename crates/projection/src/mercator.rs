//! Spherical Web Mercator projection (EPSG:3857).
//!
//! Maps longitude/latitude on the WGS84 sphere approximation to meters:
//! - x = R * lon
//! - y = R * ln(tan(pi/4 + lat/2))
//!
//! The projection diverges at the poles, so latitudes are limited to
//! ±85.0511287798° (the square world extent used by web maps).

use std::f64::consts::PI;

use crate::{PlanarProjection, ProjectionError};

/// WGS84 semi-major axis used by EPSG:3857 (meters)
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Latitude at which the projected world becomes square (degrees)
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Half the projected world width (meters)
pub const MAX_EXTENT: f64 = 20037508.342789244;

/// Web Mercator projection parameters.
#[derive(Debug, Clone, Copy)]
pub struct WebMercator {
    /// Sphere radius (meters)
    pub radius: f64,
}

impl WebMercator {
    pub fn new() -> Self {
        Self {
            radius: EARTH_RADIUS,
        }
    }
}

impl Default for WebMercator {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanarProjection for WebMercator {
    fn to_planar(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjectionError> {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(ProjectionError::NonFinite { x: lon, y: lat });
        }
        if lat.abs() > MAX_LATITUDE {
            return Err(ProjectionError::LatitudeOutOfRange {
                lat,
                limit: MAX_LATITUDE,
            });
        }

        let to_rad = PI / 180.0;
        let x = self.radius * lon * to_rad;
        let y = self.radius * (PI / 4.0 + lat * to_rad / 2.0).tan().ln();

        if !x.is_finite() || !y.is_finite() {
            return Err(ProjectionError::Singular { x: lon, y: lat });
        }
        Ok((x, y))
    }

    fn to_geographic(&self, x: f64, y: f64) -> Result<(f64, f64), ProjectionError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ProjectionError::NonFinite { x, y });
        }

        let to_deg = 180.0 / PI;
        let lon = x / self.radius * to_deg;
        let lat = (2.0 * (y / self.radius).exp().atan() - PI / 2.0) * to_deg;

        if !lon.is_finite() || !lat.is_finite() {
            return Err(ProjectionError::Singular { x, y });
        }
        Ok((lon, lat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin() {
        let proj = WebMercator::new();
        let (x, y) = proj.to_planar(0.0, 0.0).unwrap();
        assert!(x.abs() < 1e-9);
        assert!(y.abs() < 1e-9);
    }

    #[test]
    fn test_world_extent() {
        let proj = WebMercator::new();
        let (x, y) = proj.to_planar(180.0, MAX_LATITUDE).unwrap();
        assert!((x - MAX_EXTENT).abs() < 1e-6);
        assert!((y - MAX_EXTENT).abs() < 1e-3);
    }

    #[test]
    fn test_round_trip_new_york() {
        let proj = WebMercator::new();
        let (x, y) = proj.to_planar(-73.9857, 40.7484).unwrap();
        // Known EPSG:3857 coordinates for this point
        assert!((x - (-8_236_050.45)).abs() < 1.0);
        assert!((y - 4_975_301.25).abs() < 1.0);

        let (lon, lat) = proj.to_geographic(x, y).unwrap();
        assert!((lon - (-73.9857)).abs() < 1e-9);
        assert!((lat - 40.7484).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_polar_and_non_finite() {
        let proj = WebMercator::new();
        assert!(matches!(
            proj.to_planar(0.0, 89.0),
            Err(ProjectionError::LatitudeOutOfRange { .. })
        ));
        assert!(matches!(
            proj.to_planar(f64::NAN, 10.0),
            Err(ProjectionError::NonFinite { .. })
        ));
        assert!(matches!(
            proj.to_geographic(f64::INFINITY, 0.0),
            Err(ProjectionError::NonFinite { .. })
        ));
    }
}
