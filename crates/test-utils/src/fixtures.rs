//! Common test fixtures for route density tests.
//!
//! Pre-defined geometries and extents that represent the scenarios the
//! pipeline has to get right.

use route_common::{BoundingBox, RouteGeometry};

/// Common bounding box definitions for testing.
pub mod bbox {
    /// Unit square used by the small hand-checked grids
    pub const UNIT: (f64, f64, f64, f64) = (0.0, 0.0, 1.0, 1.0);

    /// Lower Manhattan, a typical bike-share extent
    pub const MANHATTAN: (f64, f64, f64, f64) = (-74.02, 40.70, -73.93, 40.80);

    /// Single point (degenerate bbox)
    pub const POINT: (f64, f64, f64, f64) = (-73.98, 40.75, -73.98, 40.75);
}

/// Convert a fixture tuple into a [`BoundingBox`].
pub fn to_bbox((min_x, min_y, max_x, max_y): (f64, f64, f64, f64)) -> BoundingBox {
    BoundingBox::new(min_x, min_y, max_x, max_y)
}

/// Horizontal line along the southern edge of the unit square.
pub fn unit_horizontal() -> RouteGeometry {
    RouteGeometry::line(vec![(0.0, 0.0), (1.0, 0.0)]).expect("valid fixture")
}

/// Diagonal across the unit square, south-west to north-east.
pub fn unit_diagonal() -> RouteGeometry {
    RouteGeometry::line(vec![(0.0, 0.0), (1.0, 1.0)]).expect("valid fixture")
}

/// A short mid-latitude route in Manhattan.
pub fn manhattan_route() -> RouteGeometry {
    RouteGeometry::line(vec![
        (-73.9857, 40.7484),
        (-73.9851, 40.7527),
        (-73.9776, 40.7614),
        (-73.9712, 40.7644),
    ])
    .expect("valid fixture")
}

/// Two-part route whose parts cross each other.
pub fn crossing_multi_line() -> RouteGeometry {
    RouteGeometry::multi_line(vec![
        vec![(0.0, 0.5), (1.0, 0.5)],
        vec![(0.5, 0.0), (0.5, 1.0)],
    ])
    .expect("valid fixture")
}
