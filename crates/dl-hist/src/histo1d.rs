//! Weighted 1D histogram with under/overflow and sumw2 tracking.

use crate::axis::Axis;
use dl_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// A weighted 1D histogram.
///
/// Bin contents are sums of fill weights; `sumw2` tracks the sum of squared
/// weights per bin for statistical errors. Out-of-range fills accumulate in
/// the under/overflow counters and never panic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histo1D {
    /// Histogram name (unique within a book).
    pub name: String,
    /// Binning.
    pub axis: Axis,
    /// Sum of weights per bin.
    pub sumw: Vec<f64>,
    /// Sum of squared weights per bin.
    pub sumw2: Vec<f64>,
    /// Sum of weights below the first bin.
    pub underflow: f64,
    /// Sum of weights at or above the last edge.
    pub overflow: f64,
    /// Number of fill calls (unweighted count).
    pub entries: u64,
}

impl Histo1D {
    /// Create an empty histogram over the given axis.
    pub fn new(name: impl Into<String>, axis: Axis) -> Self {
        let n = axis.n_bins();
        Self {
            name: name.into(),
            axis,
            sumw: vec![0.0; n],
            sumw2: vec![0.0; n],
            underflow: 0.0,
            overflow: 0.0,
            entries: 0,
        }
    }

    /// Fill with unit weight.
    pub fn fill(&mut self, x: f64) {
        self.fill_w(x, 1.0);
    }

    /// Fill with the given weight.
    pub fn fill_w(&mut self, x: f64, w: f64) {
        self.entries += 1;
        match self.axis.index(x) {
            Some(i) => {
                self.sumw[i] += w;
                self.sumw2[i] += w * w;
            }
            None => {
                if self.axis.is_underflow(x) {
                    self.underflow += w;
                } else {
                    self.overflow += w;
                }
            }
        }
    }

    /// In-range integral `Σ sumw_i · width_i`.
    pub fn integral(&self) -> f64 {
        self.sumw
            .iter()
            .enumerate()
            .map(|(i, w)| w * self.axis.width(i))
            .sum()
    }

    /// Multiply all contents (including flows) by `k`; `sumw2` scales by `k²`.
    pub fn scale(&mut self, k: f64) {
        for w in &mut self.sumw {
            *w *= k;
        }
        for w2 in &mut self.sumw2 {
            *w2 *= k * k;
        }
        self.underflow *= k;
        self.overflow *= k;
    }

    /// Scale so the in-range integral equals `to`.
    ///
    /// A histogram with zero integral is left untouched (with a warning):
    /// there is no shape to normalize.
    pub fn normalize(&mut self, to: f64) {
        let integral = self.integral();
        if integral == 0.0 {
            tracing::warn!(name = %self.name, "normalize on empty histogram, skipped");
            return;
        }
        self.scale(to / integral);
    }

    /// Add another histogram's contents into this one.
    ///
    /// Fails unless the binning matches exactly.
    pub fn merge(&mut self, other: &Histo1D) -> Result<()> {
        if self.axis != other.axis {
            return Err(Error::Validation(format!(
                "binning mismatch merging histogram '{}'",
                self.name
            )));
        }
        for (a, b) in self.sumw.iter_mut().zip(&other.sumw) {
            *a += b;
        }
        for (a, b) in self.sumw2.iter_mut().zip(&other.sumw2) {
            *a += b;
        }
        self.underflow += other.underflow;
        self.overflow += other.overflow;
        self.entries += other.entries;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn h(n: usize, lo: f64, hi: f64) -> Histo1D {
        Histo1D::new("h", Axis::uniform(n, lo, hi).unwrap())
    }

    #[test]
    fn fill_and_flows() {
        let mut hist = h(3, 0.0, 3.0);
        for x in [0.5, 1.5, 2.5, 0.5, -1.0, 3.5] {
            hist.fill(x);
        }
        assert_eq!(hist.sumw, vec![2.0, 1.0, 1.0]);
        assert_eq!(hist.underflow, 1.0);
        assert_eq!(hist.overflow, 1.0);
        assert_eq!(hist.entries, 6);
    }

    #[test]
    fn weighted_fill_tracks_sumw2() {
        let mut hist = h(2, 0.0, 2.0);
        hist.fill_w(0.5, 2.0);
        hist.fill_w(1.5, 3.0);
        hist.fill_w(0.5, 1.0);
        assert_eq!(hist.sumw, vec![3.0, 3.0]);
        assert_eq!(hist.sumw2, vec![5.0, 9.0]);
    }

    #[test]
    fn scale_is_linear_in_w_quadratic_in_w2() {
        let mut hist = h(2, 0.0, 2.0);
        hist.fill(0.5);
        hist.fill(1.5);
        hist.scale(2.0);
        assert_eq!(hist.sumw, vec![2.0, 2.0]);
        assert_eq!(hist.sumw2, vec![4.0, 4.0]);
    }

    #[test]
    fn normalize_to_unit_area() {
        let mut hist = h(4, 0.0, 2.0);
        for x in [0.1, 0.6, 1.1, 1.6, 1.7] {
            hist.fill(x);
        }
        hist.normalize(1.0);
        assert_relative_eq!(hist.integral(), 1.0, max_relative = 1e-12);
    }

    #[test]
    fn normalize_empty_is_noop() {
        let mut hist = h(2, 0.0, 2.0);
        hist.normalize(1.0);
        assert_eq!(hist.sumw, vec![0.0, 0.0]);
    }

    #[test]
    fn merge_adds_bins_and_flows() {
        let mut a = h(2, 0.0, 2.0);
        let mut b = h(2, 0.0, 2.0);
        a.fill(0.5);
        b.fill_w(0.5, 2.0);
        b.fill(-1.0);
        a.merge(&b).unwrap();
        assert_eq!(a.sumw, vec![3.0, 0.0]);
        assert_eq!(a.underflow, 1.0);
        assert_eq!(a.entries, 3);
    }

    #[test]
    fn merge_rejects_binning_mismatch() {
        let mut a = h(2, 0.0, 2.0);
        let b = h(3, 0.0, 2.0);
        assert!(a.merge(&b).is_err());
    }
}
