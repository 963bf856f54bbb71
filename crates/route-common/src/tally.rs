//! Counting of recoverable per-item failures.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;

/// How many example diagnostics are kept per tally.
pub const MAX_SAMPLES: usize = 3;

/// Aggregated count of skipped items, keyed by a short reason label, with a
/// handful of example diagnostics kept for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkipTally {
    counts: BTreeMap<&'static str, usize>,
    samples: Vec<String>,
}

impl SkipTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one skipped item. The detail is kept only while fewer than
    /// [`MAX_SAMPLES`] examples have been collected.
    pub fn record(&mut self, reason: &'static str, detail: impl Display) {
        *self.counts.entry(reason).or_insert(0) += 1;
        if self.samples.len() < MAX_SAMPLES {
            self.samples.push(format!("{}: {}", reason, detail));
        }
    }

    /// Fold another tally into this one.
    pub fn merge(&mut self, other: SkipTally) {
        for (reason, count) in other.counts {
            *self.counts.entry(reason).or_insert(0) += count;
        }
        for sample in other.samples {
            if self.samples.len() >= MAX_SAMPLES {
                break;
            }
            self.samples.push(sample);
        }
    }

    /// Total skipped items across all reasons.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Count for a single reason.
    pub fn count(&self, reason: &str) -> usize {
        self.counts.get(reason).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &BTreeMap<&'static str, usize> {
        &self.counts
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_limited_samples() {
        let mut tally = SkipTally::new();
        for i in 0..10 {
            tally.record("missing_geometry", format!("feature {}", i));
        }
        tally.record("malformed", "bad coordinates");

        assert_eq!(tally.total(), 11);
        assert_eq!(tally.count("missing_geometry"), 10);
        assert_eq!(tally.count("malformed"), 1);
        assert_eq!(tally.samples().len(), MAX_SAMPLES);
        assert_eq!(tally.samples()[0], "missing_geometry: feature 0");
    }

    #[test]
    fn test_merge_adds_counts() {
        let mut a = SkipTally::new();
        a.record("degenerate", "x");
        let mut b = SkipTally::new();
        b.record("degenerate", "y");
        b.record("non_finite", "z");

        a.merge(b);
        assert_eq!(a.count("degenerate"), 2);
        assert_eq!(a.count("non_finite"), 1);
        assert_eq!(a.total(), 3);
    }
}
