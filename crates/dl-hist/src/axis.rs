//! Binning axis shared by histograms and profiles.

use dl_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// A 1D binning: sorted bin edges, `n_bins = edges.len() - 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    edges: Vec<f64>,
}

impl Axis {
    /// Create an axis from explicit bin edges.
    ///
    /// Edges must be finite, strictly increasing, and describe at least one
    /// bin.
    pub fn from_edges(edges: Vec<f64>) -> Result<Self> {
        if edges.len() < 2 {
            return Err(Error::Validation(format!(
                "axis needs at least 2 edges, got {}",
                edges.len()
            )));
        }
        for pair in edges.windows(2) {
            if !pair[0].is_finite() || !pair[1].is_finite() || pair[0] >= pair[1] {
                return Err(Error::Validation(format!(
                    "axis edges must be finite and strictly increasing, got {} then {}",
                    pair[0], pair[1]
                )));
            }
        }
        Ok(Self { edges })
    }

    /// Create a uniform axis with `n` bins over `[lo, hi)`.
    pub fn uniform(n: usize, lo: f64, hi: f64) -> Result<Self> {
        if n == 0 {
            return Err(Error::Validation("axis needs at least 1 bin".into()));
        }
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(Error::Validation(format!(
                "invalid axis range: expected lo < hi, got ({lo}, {hi})"
            )));
        }
        let width = (hi - lo) / n as f64;
        let mut edges: Vec<f64> = (0..n).map(|i| lo + width * i as f64).collect();
        edges.push(hi);
        Ok(Self { edges })
    }

    /// Number of in-range bins.
    pub fn n_bins(&self) -> usize {
        self.edges.len() - 1
    }

    /// Bin edges (length `n_bins + 1`).
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Lower edge of the first bin.
    pub fn lo(&self) -> f64 {
        self.edges[0]
    }

    /// Upper edge of the last bin.
    pub fn hi(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    /// Width of bin `i`.
    pub fn width(&self, i: usize) -> f64 {
        self.edges[i + 1] - self.edges[i]
    }

    /// Midpoint of bin `i`.
    pub fn mid(&self, i: usize) -> f64 {
        0.5 * (self.edges[i] + self.edges[i + 1])
    }

    /// Bin index for `x`, `None` for under/overflow (and NaN).
    pub fn index(&self, x: f64) -> Option<usize> {
        if x.is_nan() || x < self.lo() || x >= self.hi() {
            return None;
        }
        match self.edges.binary_search_by(|e| e.partial_cmp(&x).unwrap()) {
            Ok(i) => {
                if i >= self.edges.len() - 1 {
                    None
                } else {
                    Some(i)
                }
            }
            Err(i) => Some(i - 1),
        }
    }

    /// Whether `x` falls below the first edge. NaN counts as neither flow.
    pub fn is_underflow(&self, x: f64) -> bool {
        x < self.lo()
    }
}
