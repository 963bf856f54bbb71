//! Route density grid.

use crate::{RouteError, RouteResult};

/// Row-major grid of `u32` route counters, row 0 at the northern edge.
///
/// Counters saturate at `u32::MAX` rather than wrapping. That ceiling is far
/// beyond realistic route densities and is the only overflow policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DensityGrid {
    width: usize,
    height: usize,
    cells: Vec<u32>,
}

impl DensityGrid {
    /// Create a zero-initialized grid.
    pub fn new(width: usize, height: usize) -> RouteResult<Self> {
        let len = width
            .checked_mul(height)
            .filter(|&len| len > 0)
            .ok_or(RouteError::InvalidDimensions { width, height })?;
        Ok(Self {
            width,
            height,
            cells: vec![0; len],
        })
    }

    /// Wrap existing row-major counts.
    pub fn from_cells(width: usize, height: usize, cells: Vec<u32>) -> RouteResult<Self> {
        if width == 0 || height == 0 || width.checked_mul(height) != Some(cells.len()) {
            return Err(RouteError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a constructed grid; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major flat index of (col, row).
    #[inline]
    pub fn flat_index(&self, col: usize, row: usize) -> usize {
        row * self.width + col
    }

    /// Count at (col, row), `None` when out of bounds.
    pub fn get(&self, col: usize, row: usize) -> Option<u32> {
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(self.cells[self.flat_index(col, row)])
    }

    /// Row-major view of all counters.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Add one to every listed flat index. Indices outside the grid are ignored.
    pub fn increment_cells(&mut self, indices: &[usize]) {
        for &idx in indices {
            if let Some(cell) = self.cells.get_mut(idx) {
                *cell = cell.saturating_add(1);
            }
        }
    }

    /// Elementwise saturating addition of another grid with the same shape.
    pub fn merge(&mut self, other: &DensityGrid) -> RouteResult<()> {
        if self.width != other.width || self.height != other.height {
            return Err(RouteError::InvalidDimensions {
                width: other.width,
                height: other.height,
            });
        }
        for (dst, src) in self.cells.iter_mut().zip(&other.cells) {
            *dst = dst.saturating_add(*src);
        }
        Ok(())
    }

    /// Largest counter value.
    pub fn max_value(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Number of cells touched by at least one route.
    pub fn nonzero_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v > 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_zeroed() {
        let grid = DensityGrid::new(4, 3).unwrap();
        assert_eq!(grid.len(), 12);
        assert_eq!(grid.max_value(), 0);
        assert_eq!(grid.nonzero_count(), 0);
        assert!(DensityGrid::new(0, 3).is_err());
    }

    #[test]
    fn test_increment_and_get() {
        let mut grid = DensityGrid::new(4, 3).unwrap();
        let idx = grid.flat_index(2, 1);
        grid.increment_cells(&[idx, 0, 999]);
        grid.increment_cells(&[idx]);

        assert_eq!(grid.get(2, 1), Some(2));
        assert_eq!(grid.get(0, 0), Some(1));
        assert_eq!(grid.get(4, 0), None);
        assert_eq!(grid.nonzero_count(), 2);
    }

    #[test]
    fn test_counters_saturate() {
        let mut grid = DensityGrid::from_cells(1, 1, vec![u32::MAX]).unwrap();
        grid.increment_cells(&[0]);
        assert_eq!(grid.cells()[0], u32::MAX);

        let other = DensityGrid::from_cells(1, 1, vec![5]).unwrap();
        grid.merge(&other).unwrap();
        assert_eq!(grid.cells()[0], u32::MAX);
    }

    #[test]
    fn test_merge_shape_mismatch() {
        let mut a = DensityGrid::new(2, 2).unwrap();
        let b = DensityGrid::new(3, 2).unwrap();
        assert!(a.merge(&b).is_err());
    }
}
