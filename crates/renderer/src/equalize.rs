//! Histogram equalization of density counts.
//!
//! Route densities are heavily skewed: a few corridors carry most routes
//! while most touched cells see one or two. Mapping each count through the
//! empirical CDF of the nonzero counts spreads the colors evenly over the
//! occupied cells. Empty cells are excluded from the histogram and map to
//! 0.0, the lowest ramp color.

use std::collections::BTreeMap;

use rayon::prelude::*;
use route_common::DensityGrid;

use crate::colormap::{lut_color, ColorRamp};

/// Largest maximum count for which a dense bin array is used. Above it the
/// histogram is kept as an ordered map of the values actually present.
pub const DENSE_HISTOGRAM_LIMIT: u32 = 1 << 20;

#[derive(Debug, Clone, PartialEq)]
enum Cdf {
    /// `cdf[v]` for every v in `0..=max`.
    Dense(Vec<f64>),
    /// CDF at each distinct nonzero value.
    Sparse(BTreeMap<u32, f64>),
}

/// Empirical CDF of the nonzero counts of a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct EqualizationCurve {
    cdf: Cdf,
    nonzero: usize,
    max_value: u32,
}

impl EqualizationCurve {
    /// Build the curve for a set of counts. Returns `None` when every count
    /// is zero.
    pub fn from_counts(counts: &[u32]) -> Option<Self> {
        Self::build(counts, DENSE_HISTOGRAM_LIMIT)
    }

    fn build(counts: &[u32], dense_limit: u32) -> Option<Self> {
        let max_value = counts.iter().copied().max().unwrap_or(0);
        let nonzero = counts.iter().filter(|&&v| v > 0).count();
        if nonzero == 0 {
            return None;
        }
        let total = nonzero as f64;

        let cdf = if max_value <= dense_limit {
            let mut bins = vec![0usize; max_value as usize + 1];
            for &v in counts.iter().filter(|&&v| v > 0) {
                bins[v as usize] += 1;
            }
            let mut running = 0usize;
            Cdf::Dense(
                bins.into_iter()
                    .map(|n| {
                        running += n;
                        running as f64 / total
                    })
                    .collect(),
            )
        } else {
            let mut bins: BTreeMap<u32, usize> = BTreeMap::new();
            for &v in counts.iter().filter(|&&v| v > 0) {
                *bins.entry(v).or_insert(0) += 1;
            }
            let mut running = 0usize;
            Cdf::Sparse(
                bins.into_iter()
                    .map(|(v, n)| {
                        running += n;
                        (v, running as f64 / total)
                    })
                    .collect(),
            )
        };

        Some(Self {
            cdf,
            nonzero,
            max_value,
        })
    }

    /// Number of nonzero counts the curve was built from.
    pub fn nonzero(&self) -> usize {
        self.nonzero
    }

    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    /// Equalized scalar for a count: 0.0 for zero, otherwise the fraction
    /// of nonzero counts that are `<= value`.
    pub fn value(&self, value: u32) -> f64 {
        if value == 0 {
            return 0.0;
        }
        match &self.cdf {
            Cdf::Dense(cdf) => cdf
                .get(value as usize)
                .copied()
                .unwrap_or(1.0),
            Cdf::Sparse(cdf) => cdf
                .range(..=value)
                .next_back()
                .map(|(_, &p)| p)
                .unwrap_or(0.0),
        }
    }
}

/// Equalized scalar per cell, row-major. An all-zero grid yields all 0.0.
pub fn equalize(grid: &DensityGrid) -> Vec<f64> {
    match EqualizationCurve::from_counts(grid.cells()) {
        Some(curve) => grid.cells().par_iter().map(|&v| curve.value(v)).collect(),
        None => vec![0.0; grid.len()],
    }
}

/// RGB bytes (3 per pixel, row-major) of the equalized, color-mapped grid.
///
/// A grid with no nonzero cell renders solid black whatever the ramp.
pub fn render_equalized(grid: &DensityGrid, ramp: ColorRamp) -> Vec<u8> {
    let width = grid.width();
    let mut rgb = vec![0u8; grid.len() * 3];

    let Some(curve) = EqualizationCurve::from_counts(grid.cells()) else {
        return rgb;
    };
    let lut = ramp.lut();

    rgb.par_chunks_mut(width * 3)
        .zip(grid.cells().par_chunks(width))
        .for_each(|(out_row, counts)| {
            for (pixel, &count) in out_row.chunks_exact_mut(3).zip(counts) {
                pixel.copy_from_slice(&lut_color(&lut, curve.value(count)));
            }
        });

    rgb
}
