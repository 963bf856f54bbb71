//! Shared test utilities for the route density workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Route fixtures (known geometries and bounding boxes)
//! - Synthetic route generators
//! - GeoJSON document builders and temp-file writers
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixtures, random_routes};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use generators::*;

/// Assert that two `(x, y)` coordinates agree on both axes within `tol`.
///
/// ```
/// use test_utils::assert_coord_near;
///
/// assert_coord_near!((-73.98, 40.75), (-73.980_000_1, 40.75), 1e-6);
/// ```
#[macro_export]
macro_rules! assert_coord_near {
    ($actual:expr, $expected:expr, $tol:expr) => {{
        let (ax, ay): (f64, f64) = $actual;
        let (ex, ey): (f64, f64) = $expected;
        let tol: f64 = $tol;
        if !((ax - ex).abs() <= tol && (ay - ey).abs() <= tol) {
            panic!(
                "coordinates differ: ({}, {}) vs expected ({}, {}), tolerance {}",
                ax, ay, ex, ey, tol
            );
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_coord_near_passes() {
        assert_coord_near!((1.0001, 2.0), (1.0, 2.0), 0.001);
    }

    #[test]
    #[should_panic(expected = "coordinates differ")]
    fn test_coord_near_checks_both_axes() {
        assert_coord_near!((1.0, 2.1), (1.0, 2.0), 0.001);
    }

    #[test]
    #[should_panic(expected = "coordinates differ")]
    fn test_coord_near_rejects_nan() {
        assert_coord_near!((f64::NAN, 0.0), (0.0, 0.0), 1.0);
    }
}
