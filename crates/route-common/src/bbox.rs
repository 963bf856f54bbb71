//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

/// A geographic or projected bounding box.
///
/// For geographic CRS (EPSG:4326), coordinates are in degrees.
/// For projected CRS (EPSG:3857), coordinates are in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Degenerate box covering a single point.
    pub fn from_point(x: f64, y: f64) -> Self {
        Self::new(x, y, x, y)
    }

    /// Smallest box containing every point of the iterator.
    ///
    /// Returns `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut iter = points.into_iter();
        let (x, y) = iter.next()?;
        let mut bbox = Self::from_point(x, y);
        for (x, y) in iter {
            bbox.expand_to_point(x, y);
        }
        Some(bbox)
    }

    /// Width of the bounding box in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in coordinate units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Grow the box so it contains the point.
    pub fn expand_to_point(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Union of two bounding boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Expand any axis narrower than `min_extent` symmetrically around its
    /// center.
    ///
    /// Far from the origin `min_extent` can fall below the float spacing of
    /// the coordinates (Web Mercator meters near the antimeridian), so the
    /// extent used per axis is never less than a few ULPs of its center.
    /// The widened axis always has `max > min`.
    pub fn with_min_extent(&self, min_extent: f64) -> BoundingBox {
        let mut out = *self;
        if let Some((min, max)) = widen_axis(self.min_x, self.max_x, min_extent) {
            out.min_x = min;
            out.max_x = max;
        }
        if let Some((min, max)) = widen_axis(self.min_y, self.max_y, min_extent) {
            out.min_y = min;
            out.max_y = max;
        }
        out
    }

    /// True when all corners are finite and min <= max on both axes.
    pub fn is_valid(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
            && self.min_x <= self.max_x
            && self.min_y <= self.max_y
    }

    /// Check if this bbox intersects another.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Check if a point is contained within this bbox.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Widened `(min, max)` for an axis narrower than the effective extent,
/// or `None` when the axis is already wide enough.
fn widen_axis(min: f64, max: f64, min_extent: f64) -> Option<(f64, f64)> {
    let center = (min + max) / 2.0;
    let extent = min_extent.max(center.abs() * f64::EPSILON * 8.0);
    if max - min >= extent {
        return None;
    }
    Some((center - extent / 2.0, center + extent / 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let bbox = BoundingBox::from_points([(1.0, 5.0), (-2.0, 3.0), (4.0, -1.0)]).unwrap();
        assert_eq!(bbox, BoundingBox::new(-2.0, -1.0, 4.0, 5.0));
        assert!(BoundingBox::from_points(Vec::new()).is_none());
    }

    #[test]
    fn test_min_extent_expands_degenerate_axis() {
        let bbox = BoundingBox::new(10.0, 20.0, 10.0, 25.0).with_min_extent(1e-6);
        assert!((bbox.width() - 1e-6).abs() < 1e-12);
        assert!((bbox.min_x + bbox.max_x - 20.0).abs() < 1e-9);
        // Non-degenerate axis is untouched
        assert_eq!(bbox.min_y, 20.0);
        assert_eq!(bbox.max_y, 25.0);
    }

    #[test]
    fn test_min_extent_survives_large_coordinates() {
        // Web Mercator x of longitude 151.21: the float spacing here is
        // larger than 1e-9, so a fixed extent would round away
        let x = 16_832_620.202_850_897;
        let bbox = BoundingBox::new(x, -4_011_000.0, x, -4_009_000.0).with_min_extent(1e-9);
        assert!(bbox.max_x > bbox.min_x);
        assert!(bbox.contains_point(x, -4_010_000.0));
        assert_eq!(bbox.min_y, -4_011_000.0);
    }
}
