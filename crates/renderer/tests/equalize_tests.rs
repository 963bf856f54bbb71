//! Tests for histogram equalization of density grids.

use renderer::{equalize, render_equalized, ColorRamp, EqualizationCurve};
use route_common::DensityGrid;

// ============================================================================
// Equalized scalars
// ============================================================================

#[test]
fn test_all_zero_grid_equalizes_to_zero() {
    let grid = DensityGrid::new(3, 2).unwrap();
    assert_eq!(equalize(&grid), vec![0.0; 6]);
}

#[test]
fn test_scalars_follow_cdf() {
    // nonzero counts: 1, 1, 1, 4 → CDF(1) = 0.75, CDF(4) = 1.0
    let grid = DensityGrid::from_cells(3, 2, vec![0, 1, 1, 0, 1, 4]).unwrap();
    assert_eq!(equalize(&grid), vec![0.0, 0.75, 0.75, 0.0, 0.75, 1.0]);
}

#[test]
fn test_equalization_is_monotonic() {
    let cells: Vec<u32> = (0..100).map(|i| (i * i) % 37).collect();
    let grid = DensityGrid::from_cells(10, 10, cells.clone()).unwrap();
    let scalars = equalize(&grid);

    for (i, &a) in cells.iter().enumerate() {
        for (j, &b) in cells.iter().enumerate() {
            if a < b {
                assert!(scalars[i] <= scalars[j]);
            }
        }
    }
    assert!(scalars.iter().all(|&s| (0.0..=1.0).contains(&s)));
}

#[test]
fn test_curve_reports_max_and_nonzero() {
    let curve = EqualizationCurve::from_counts(&[0, 3, 8, 0, 8]).unwrap();
    assert_eq!(curve.max_value(), 8);
    assert_eq!(curve.nonzero(), 3);
    assert!((curve.value(3) - 1.0 / 3.0).abs() < 1e-12);
}

// ============================================================================
// RGB output
// ============================================================================

#[test]
fn test_rgb_buffer_layout() {
    let grid = DensityGrid::from_cells(2, 2, vec![0, 5, 5, 0]).unwrap();
    let rgb = render_equalized(&grid, ColorRamp::Greys);
    assert_eq!(rgb.len(), 12);
    // zero cells → lowest greys color (white); count 5 → CDF 1.0 → black
    assert_eq!(&rgb[0..3], &[255, 255, 255]);
    assert_eq!(&rgb[3..6], &[0, 0, 0]);
    assert_eq!(&rgb[6..9], &[0, 0, 0]);
    assert_eq!(&rgb[9..12], &[255, 255, 255]);
}

#[test]
fn test_empty_grid_renders_black_even_for_light_ramps() {
    let grid = DensityGrid::new(2, 2).unwrap();
    assert_eq!(render_equalized(&grid, ColorRamp::Greys), vec![0; 12]);
}
