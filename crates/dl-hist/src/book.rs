//! Booking registry: named accumulators with copyable fill handles.
//!
//! Every accumulator referenced during a run must be booked exactly once,
//! up front. Booking a name twice is a validation error, mirroring the
//! fatal-at-startup contract of histogram hosts.

use crate::axis::Axis;
use crate::histo1d::Histo1D;
use crate::profile1d::Profile1D;
use crate::scatter2d::Scatter2D;
use dl_core::{Error, Result};
use serde::Serialize;
use std::collections::HashSet;

/// Prefix marking working storage that is excluded from artifacts.
pub const TMP_PREFIX: &str = "TMP/";

/// Handle to a booked [`Histo1D`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoId(usize);

/// Handle to a booked [`Profile1D`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileId(usize);

/// Handle to a booked [`Scatter2D`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScatterId(usize);

/// A run's worth of named accumulators.
///
/// Handles are plain indices: they stay valid for the life of the book and
/// are never rebound.
#[derive(Debug, Clone, Default)]
pub struct Book {
    names: HashSet<String>,
    histos: Vec<Histo1D>,
    profiles: Vec<Profile1D>,
    scatters: Vec<Scatter2D>,
}

/// Serializable snapshot of a [`Book`], excluding `TMP/` working storage.
#[derive(Debug, Clone, Serialize)]
pub struct BookArtifact {
    /// Booked histograms.
    pub histograms: Vec<Histo1D>,
    /// Booked profiles.
    pub profiles: Vec<Profile1D>,
    /// Booked scatters.
    pub scatters: Vec<Scatter2D>,
}

impl Book {
    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    fn claim(&mut self, name: &str) -> Result<()> {
        if !self.names.insert(name.to_owned()) {
            return Err(Error::Validation(format!("'{name}' booked twice")));
        }
        Ok(())
    }

    /// Book a uniformly binned 1D histogram.
    pub fn histo1d(&mut self, name: &str, n: usize, lo: f64, hi: f64) -> Result<HistoId> {
        self.claim(name)?;
        self.histos.push(Histo1D::new(name, Axis::uniform(n, lo, hi)?));
        Ok(HistoId(self.histos.len() - 1))
    }

    /// Book a uniformly binned profile.
    pub fn profile1d(&mut self, name: &str, n: usize, lo: f64, hi: f64) -> Result<ProfileId> {
        self.claim(name)?;
        self.profiles.push(Profile1D::new(name, Axis::uniform(n, lo, hi)?));
        Ok(ProfileId(self.profiles.len() - 1))
    }

    /// Book an (initially empty) scatter, filled at finalize time.
    pub fn scatter2d(&mut self, name: &str) -> Result<ScatterId> {
        self.claim(name)?;
        self.scatters.push(Scatter2D::new(name));
        Ok(ScatterId(self.scatters.len() - 1))
    }

    /// Shared access to a histogram.
    pub fn histo(&self, id: HistoId) -> &Histo1D {
        &self.histos[id.0]
    }

    /// Mutable access to a histogram.
    pub fn histo_mut(&mut self, id: HistoId) -> &mut Histo1D {
        &mut self.histos[id.0]
    }

    /// Shared access to a profile.
    pub fn profile(&self, id: ProfileId) -> &Profile1D {
        &self.profiles[id.0]
    }

    /// Mutable access to a profile.
    pub fn profile_mut(&mut self, id: ProfileId) -> &mut Profile1D {
        &mut self.profiles[id.0]
    }

    /// Shared access to a scatter.
    pub fn scatter(&self, id: ScatterId) -> &Scatter2D {
        &self.scatters[id.0]
    }

    /// Look up a histogram by name.
    pub fn histo_by_name(&self, name: &str) -> Option<&Histo1D> {
        self.histos.iter().find(|h| h.name == name)
    }

    /// Look up a profile by name.
    pub fn profile_by_name(&self, name: &str) -> Option<&Profile1D> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Look up a scatter by name.
    pub fn scatter_by_name(&self, name: &str) -> Option<&Scatter2D> {
        self.scatters.iter().find(|s| s.name == name)
    }

    /// Replace the scatter `out` with the bin-wise ratio `num / den`.
    pub fn divide(&mut self, num: HistoId, den: HistoId, out: ScatterId) -> Result<()> {
        let name = self.scatters[out.0].name.clone();
        let ratio = Scatter2D::ratio(name, self.histo(num), self.histo(den))?;
        self.scatters[out.0] = ratio;
        Ok(())
    }

    /// Merge another book's accumulators into this one.
    ///
    /// Both books must have been booked identically (same order, names and
    /// binnings) — the case when each parallel worker ran the same `init`.
    pub fn merge(&mut self, other: &Book) -> Result<()> {
        if self.histos.len() != other.histos.len()
            || self.profiles.len() != other.profiles.len()
            || self.scatters.len() != other.scatters.len()
        {
            return Err(Error::Validation("books have different shapes".into()));
        }
        for (a, b) in self.histos.iter_mut().zip(&other.histos) {
            if a.name != b.name {
                return Err(Error::Validation(format!(
                    "book mismatch: '{}' vs '{}'",
                    a.name, b.name
                )));
            }
            a.merge(b)?;
        }
        for (a, b) in self.profiles.iter_mut().zip(&other.profiles) {
            if a.name != b.name {
                return Err(Error::Validation(format!(
                    "book mismatch: '{}' vs '{}'",
                    a.name, b.name
                )));
            }
            a.merge(b)?;
        }
        Ok(())
    }

    /// Snapshot for serialization, dropping `TMP/` working storage.
    pub fn to_artifact(&self) -> BookArtifact {
        BookArtifact {
            histograms: self
                .histos
                .iter()
                .filter(|h| !h.name.starts_with(TMP_PREFIX))
                .cloned()
                .collect(),
            profiles: self
                .profiles
                .iter()
                .filter(|p| !p.name.starts_with(TMP_PREFIX))
                .cloned()
                .collect(),
            scatters: self
                .scatters
                .iter()
                .filter(|s| !s.name.starts_with(TMP_PREFIX))
                .cloned()
                .collect(),
        }
    }
}
