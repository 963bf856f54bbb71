//! All-touched line rasterization.
//!
//! A cell is covered when the route passes through any part of it, not just
//! its center. Each segment is clipped to the grid (Liang–Barsky) and then
//! walked cell by cell with the Amanatides–Woo traversal, which visits every
//! cell the segment crosses. A plain Bresenham walk would drop cells on
//! shallow diagonals.
//!
//! Cells are half-open `[col, col + 1) x [row, row + 1)` in pixel space,
//! except that the far edges (`x = width`, `y = height`) belong to the last
//! column and row.

use std::fmt;

use route_common::{GeoTransform, RouteGeometry};

/// Tolerance for treating two boundary crossings as simultaneous, in units
/// of the segment parameter `t`.
const CORNER_EPSILON: f64 = 1e-12;

/// Pixel coordinates this close outside the grid edge are snapped onto it.
/// Envelope vertices land exactly on the edges up to rounding error.
const EDGE_SNAP: f64 = 1e-6;

/// Sorted, de-duplicated flat indices of the cells one geometry covers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageMask {
    indices: Vec<usize>,
}

impl CoverageMask {
    /// Build from arbitrary indices.
    pub fn from_indices(mut indices: Vec<usize>) -> Self {
        indices.sort_unstable();
        indices.dedup();
        Self { indices }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }
}

/// Why a geometry produced no coverage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RasterSkip {
    /// A vertex mapped to a non-finite pixel coordinate.
    NonFinite { col: f64, row: f64 },
    /// No segment intersects the grid.
    OutOfBounds,
}

impl RasterSkip {
    /// Short label used in run summaries.
    pub fn label(&self) -> &'static str {
        match self {
            RasterSkip::NonFinite { .. } => "non_finite",
            RasterSkip::OutOfBounds => "out_of_bounds",
        }
    }
}

impl fmt::Display for RasterSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterSkip::NonFinite { col, row } => {
                write!(f, "pixel coordinate ({}, {}) is not finite", col, row)
            }
            RasterSkip::OutOfBounds => write!(f, "geometry lies outside the grid"),
        }
    }
}

/// Result of rasterizing one geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum RasterizeOutcome {
    Covered(CoverageMask),
    Skipped(RasterSkip),
}

/// Rasterize one geometry into the set of cells it touches.
///
/// For a multi-line the mask is the union over all parts, so each cell
/// appears at most once whatever the overlap between parts.
pub fn rasterize_line(
    geometry: &RouteGeometry,
    transform: &GeoTransform,
    width: usize,
    height: usize,
) -> RasterizeOutcome {
    if width == 0 || height == 0 {
        return RasterizeOutcome::Skipped(RasterSkip::OutOfBounds);
    }

    let mut cells = Vec::new();
    for part in geometry.parts() {
        let mut pixels = Vec::with_capacity(part.len());
        for &(x, y) in part {
            let (col, row) = transform.to_pixel(x, y);
            if !col.is_finite() || !row.is_finite() {
                return RasterizeOutcome::Skipped(RasterSkip::NonFinite { col, row });
            }
            pixels.push((snap_to_edge(col, width), snap_to_edge(row, height)));
        }

        // A single-vertex part still marks the cell it sits in
        if pixels.len() == 1 {
            trace_segment(&mut cells, pixels[0], pixels[0], width, height);
        }
        for pair in pixels.windows(2) {
            trace_segment(&mut cells, pair[0], pair[1], width, height);
        }
    }

    if cells.is_empty() {
        return RasterizeOutcome::Skipped(RasterSkip::OutOfBounds);
    }
    RasterizeOutcome::Covered(CoverageMask::from_indices(cells))
}

#[inline]
fn snap_to_edge(v: f64, n: usize) -> f64 {
    let n = n as f64;
    if v < 0.0 && v > -EDGE_SNAP {
        0.0
    } else if v > n && v < n + EDGE_SNAP {
        n
    } else {
        v
    }
}

/// Clip the segment to `[0, width] x [0, height]` (Liang–Barsky).
fn clip_segment(
    (x0, y0): (f64, f64),
    (x1, y1): (f64, f64),
    width: f64,
    height: f64,
) -> Option<((f64, f64), (f64, f64))> {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (p, q) in [(-dx, x0), (dx, width - x0), (-dy, y0), (dy, height - y0)] {
        if p == 0.0 {
            // Parallel to this edge: reject if outside it
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        (x0 + t0 * dx, y0 + t0 * dy),
        (x0 + t1 * dx, y0 + t1 * dy),
    ))
}

/// Cell index along one axis, with the far edge folded into the last cell.
#[inline]
fn cell_of(v: f64, n: usize) -> isize {
    (v.floor().max(0.0) as isize).min(n as isize - 1)
}

/// Step direction, parameter of the first boundary crossing, and parameter
/// distance between crossings along one axis.
fn axis_setup(start: f64, cell: isize, delta: f64) -> (isize, f64, f64) {
    if delta > 0.0 {
        (1, ((cell + 1) as f64 - start) / delta, 1.0 / delta)
    } else if delta < 0.0 {
        (-1, (start - cell as f64) / -delta, -1.0 / delta)
    } else {
        (0, f64::INFINITY, f64::INFINITY)
    }
}

fn mark(cells: &mut Vec<usize>, col: isize, row: isize, width: usize, height: usize) {
    if col >= 0 && row >= 0 && (col as usize) < width && (row as usize) < height {
        cells.push(row as usize * width + col as usize);
    }
}

/// Push every cell the segment touches (Amanatides–Woo traversal).
fn trace_segment(
    cells: &mut Vec<usize>,
    from: (f64, f64),
    to: (f64, f64),
    width: usize,
    height: usize,
) {
    let Some(((x0, y0), (x1, y1))) = clip_segment(from, to, width as f64, height as f64) else {
        return;
    };

    let mut col = cell_of(x0, width);
    let mut row = cell_of(y0, height);
    let end_col = cell_of(x1, width);
    let end_row = cell_of(y1, height);

    let (step_x, mut t_max_x, t_delta_x) = axis_setup(x0, col, x1 - x0);
    let (step_y, mut t_max_y, t_delta_y) = axis_setup(y0, row, y1 - y0);

    mark(cells, col, row, width, height);

    // The walk never needs more steps than the Manhattan distance across the grid
    for _ in 0..(width + height + 2) {
        if col == end_col && row == end_row {
            break;
        }
        if t_max_x.min(t_max_y) > 1.0 {
            break;
        }

        if (t_max_x - t_max_y).abs() < CORNER_EPSILON {
            // Exactly through a corner: touch both edge neighbours
            mark(cells, col + step_x, row, width, height);
            mark(cells, col, row + step_y, width, height);
            col += step_x;
            row += step_y;
            t_max_x += t_delta_x;
            t_max_y += t_delta_y;
        } else if t_max_x < t_max_y {
            col += step_x;
            t_max_x += t_delta_x;
        } else {
            row += step_y;
            t_max_y += t_delta_y;
        }

        if col < 0 || row < 0 || col >= width as isize || row >= height as isize {
            break;
        }
        mark(cells, col, row, width, height);
    }

    mark(cells, end_col, end_row, width, height);
}
