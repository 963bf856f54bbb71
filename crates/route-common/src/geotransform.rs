//! Affine mapping between geographic coordinates and pixel space.

use crate::{BoundingBox, RouteError, RouteResult};
use serde::{Deserialize, Serialize};

/// North-up affine geotransform.
///
/// Pixel space has column 0 at `origin_x` and row 0 at `origin_y` (the
/// northern edge); rows grow southwards. Equivalent to the GDAL
/// six-coefficient form `[origin_x, pixel_width, 0, origin_y, 0, -pixel_height]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    /// Geographic X of the west edge of column 0
    pub origin_x: f64,
    /// Geographic Y of the north edge of row 0
    pub origin_y: f64,
    /// Size of one pixel in X (positive)
    pub pixel_width: f64,
    /// Size of one pixel in Y (positive; rows run north to south)
    pub pixel_height: f64,
}

impl GeoTransform {
    /// Build the transform that stretches `bbox` over a `width` x `height` grid.
    ///
    /// The box must already have a non-zero extent on both axes.
    pub fn from_bounds(bbox: &BoundingBox, width: usize, height: usize) -> RouteResult<Self> {
        if width == 0 || height == 0 {
            return Err(RouteError::InvalidDimensions { width, height });
        }
        if !bbox.is_valid() || bbox.width() <= 0.0 || bbox.height() <= 0.0 {
            return Err(RouteError::InvalidBbox(format!("{:?}", bbox)));
        }

        let transform = Self {
            origin_x: bbox.min_x,
            origin_y: bbox.max_y,
            pixel_width: bbox.width() / width as f64,
            pixel_height: bbox.height() / height as f64,
        };

        if !transform.pixel_width.is_finite()
            || !transform.pixel_height.is_finite()
            || transform.pixel_width <= 0.0
            || transform.pixel_height <= 0.0
        {
            return Err(RouteError::InvalidBbox(format!(
                "{:?} yields unusable pixel size",
                bbox
            )));
        }

        Ok(transform)
    }

    /// Map a geographic coordinate to continuous pixel coordinates (col, row).
    ///
    /// The result is not clamped; callers clip against the grid.
    #[inline]
    pub fn to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.origin_x) / self.pixel_width,
            (self.origin_y - y) / self.pixel_height,
        )
    }

    /// Map continuous pixel coordinates back to geographic coordinates.
    #[inline]
    pub fn to_geo(&self, col: f64, row: f64) -> (f64, f64) {
        (
            self.origin_x + col * self.pixel_width,
            self.origin_y - row * self.pixel_height,
        )
    }

    /// GDAL-ordered coefficients.
    pub fn to_gdal(&self) -> [f64; 6] {
        [
            self.origin_x,
            self.pixel_width,
            0.0,
            self.origin_y,
            0.0,
            -self.pixel_height,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners_map_to_grid_edges() {
        let bbox = BoundingBox::new(-74.0, 40.0, -73.0, 41.0);
        let t = GeoTransform::from_bounds(&bbox, 200, 100).unwrap();

        let (col, row) = t.to_pixel(-74.0, 41.0);
        assert!(col.abs() < 1e-9 && row.abs() < 1e-9);

        let (col, row) = t.to_pixel(-73.0, 40.0);
        assert!((col - 200.0).abs() < 1e-9);
        assert!((row - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_to_geo_inverts_to_pixel() {
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 5.0);
        let t = GeoTransform::from_bounds(&bbox, 40, 20).unwrap();
        let (col, row) = t.to_pixel(3.3, 1.7);
        let (x, y) = t.to_geo(col, row);
        assert!((x - 3.3).abs() < 1e-12);
        assert!((y - 1.7).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_zero_dimensions_and_flat_boxes() {
        let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        assert!(GeoTransform::from_bounds(&bbox, 0, 10).is_err());

        let flat = BoundingBox::new(0.0, 0.0, 1.0, 0.0);
        assert!(GeoTransform::from_bounds(&flat, 10, 10).is_err());
    }

    #[test]
    fn test_gdal_coefficients() {
        let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let t = GeoTransform::from_bounds(&bbox, 10, 10).unwrap();
        assert_eq!(t.to_gdal(), [0.0, 0.1, 0.0, 1.0, 0.0, -0.1]);
    }
}
