//! Ratio scatters built from histogram division.

use crate::histo1d::Histo1D;
use dl_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// One point of a 2D scatter: `x ± ex`, `y ± ey`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    /// Point abscissa (bin midpoint).
    pub x: f64,
    /// Half bin width.
    pub ex: f64,
    /// Point ordinate.
    pub y: f64,
    /// Ordinate uncertainty.
    pub ey: f64,
}

/// A 2D scatter, typically the bin-wise ratio of two histograms.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scatter2D {
    /// Scatter name (unique within a book).
    pub name: String,
    /// Points, one per source bin.
    pub points: Vec<ScatterPoint>,
}

impl Scatter2D {
    /// Create an empty scatter.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), points: Vec::new() }
    }

    /// Bin-wise ratio `num / den` of two identically binned histograms.
    ///
    /// Each point sits at the bin midpoint with the half bin width as `ex`.
    /// The `y` uncertainty assumes uncorrelated numerator and denominator:
    /// `ey = y · sqrt(rel²(num) + rel²(den))`. Bins with an empty denominator
    /// yield `y = 0, ey = 0`.
    pub fn ratio(name: impl Into<String>, num: &Histo1D, den: &Histo1D) -> Result<Self> {
        let name = name.into();
        if num.axis != den.axis {
            return Err(Error::Validation(format!(
                "binning mismatch dividing '{}' by '{}'",
                num.name, den.name
            )));
        }
        let mut points = Vec::with_capacity(num.axis.n_bins());
        for i in 0..num.axis.n_bins() {
            let x = num.axis.mid(i);
            let ex = 0.5 * num.axis.width(i);
            let (n, d) = (num.sumw[i], den.sumw[i]);
            if d == 0.0 {
                points.push(ScatterPoint { x, ex, y: 0.0, ey: 0.0 });
                continue;
            }
            let y = n / d;
            let rel2_n = if n == 0.0 { 0.0 } else { num.sumw2[i] / (n * n) };
            let rel2_d = den.sumw2[i] / (d * d);
            let ey = y.abs() * (rel2_n + rel2_d).sqrt();
            points.push(ScatterPoint { x, ex, y, ey });
        }
        Ok(Self { name, points })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Axis;
    use approx::assert_relative_eq;

    fn filled(counts: &[(f64, usize)]) -> Histo1D {
        let mut h = Histo1D::new("h", Axis::uniform(2, 0.0, 2.0).unwrap());
        for &(x, n) in counts {
            for _ in 0..n {
                h.fill(x);
            }
        }
        h
    }

    #[test]
    fn ratio_points_match_bin_ratios() {
        let num = filled(&[(0.5, 6), (1.5, 2)]);
        let den = filled(&[(0.5, 3), (1.5, 4)]);
        let s = Scatter2D::ratio("r", &num, &den).unwrap();
        assert_eq!(s.points.len(), 2);
        assert_relative_eq!(s.points[0].x, 0.5);
        assert_relative_eq!(s.points[0].ex, 0.5);
        assert_relative_eq!(s.points[0].y, 2.0);
        assert_relative_eq!(s.points[1].y, 0.5);
    }

    #[test]
    fn empty_denominator_bin_gives_zero_point() {
        let num = filled(&[(0.5, 1)]);
        let den = filled(&[(1.5, 1)]);
        let s = Scatter2D::ratio("r", &num, &den).unwrap();
        assert_eq!(s.points[0].y, 0.0);
        assert_eq!(s.points[0].ey, 0.0);
    }

    #[test]
    fn error_propagation_unweighted() {
        // 4/4 with unit weights: rel errors 1/2 each, ey = sqrt(0.5).
        let num = filled(&[(0.5, 4)]);
        let den = filled(&[(0.5, 4)]);
        let s = Scatter2D::ratio("r", &num, &den).unwrap();
        assert_relative_eq!(s.points[0].y, 1.0);
        assert_relative_eq!(s.points[0].ey, 0.5f64.sqrt(), max_relative = 1e-12);
    }

    #[test]
    fn mismatched_binning_rejected() {
        let num = filled(&[]);
        let den = Histo1D::new("d", Axis::uniform(3, 0.0, 2.0).unwrap());
        assert!(Scatter2D::ratio("r", &num, &den).is_err());
    }
}
