//! Profile histogram: per-bin mean of a sampled quantity.

use crate::axis::Axis;
use dl_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// A 1D profile: for each bin in `x`, the weighted mean of the sampled `y`.
///
/// Profiles are never scaled or normalized; their content is a mean, not a
/// count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile1D {
    /// Profile name (unique within a book).
    pub name: String,
    /// Binning in the `x` variable.
    pub axis: Axis,
    /// Sum of weights per bin.
    pub sumw: Vec<f64>,
    /// Sum of `w·y` per bin.
    pub sumwy: Vec<f64>,
    /// Sum of `w·y²` per bin.
    pub sumwy2: Vec<f64>,
    /// Number of fill calls landing in range.
    pub entries: u64,
}

impl Profile1D {
    /// Create an empty profile over the given axis.
    pub fn new(name: impl Into<String>, axis: Axis) -> Self {
        let n = axis.n_bins();
        Self {
            name: name.into(),
            axis,
            sumw: vec![0.0; n],
            sumwy: vec![0.0; n],
            sumwy2: vec![0.0; n],
            entries: 0,
        }
    }

    /// Sample `y` at `x` with unit weight.
    pub fn fill(&mut self, x: f64, y: f64) {
        self.fill_w(x, y, 1.0);
    }

    /// Sample `y` at `x` with the given weight. Out-of-range samples are
    /// dropped.
    pub fn fill_w(&mut self, x: f64, y: f64, w: f64) {
        if let Some(i) = self.axis.index(x) {
            self.sumw[i] += w;
            self.sumwy[i] += w * y;
            self.sumwy2[i] += w * y * y;
            self.entries += 1;
        }
    }

    /// Weighted mean of `y` in bin `i`, `None` for an empty bin.
    pub fn mean(&self, i: usize) -> Option<f64> {
        if self.sumw[i] == 0.0 {
            None
        } else {
            Some(self.sumwy[i] / self.sumw[i])
        }
    }

    /// Add another profile's sums into this one.
    pub fn merge(&mut self, other: &Profile1D) -> Result<()> {
        if self.axis != other.axis {
            return Err(Error::Validation(format!(
                "binning mismatch merging profile '{}'",
                self.name
            )));
        }
        for (a, b) in self.sumw.iter_mut().zip(&other.sumw) {
            *a += b;
        }
        for (a, b) in self.sumwy.iter_mut().zip(&other.sumwy) {
            *a += b;
        }
        for (a, b) in self.sumwy2.iter_mut().zip(&other.sumwy2) {
            *a += b;
        }
        self.entries += other.entries;
        Ok(())
    }
}
