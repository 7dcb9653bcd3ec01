//! # dl-hist
//!
//! Histogram accumulation for the dilepton analysis toolkit: 1D weighted
//! histograms with under/overflow and sum-of-weights-squared tracking,
//! profile histograms (per-bin means), ratio scatters, and a string-keyed
//! booking registry that hands out copyable fill handles.
//!
//! Artifact structs are serde-serializable so a run driver can dump the
//! whole book as plot-friendly JSON.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod axis;
pub mod book;
pub mod histo1d;
pub mod profile1d;
pub mod scatter2d;

pub use axis::Axis;
pub use book::{Book, BookArtifact, HistoId, ProfileId, ScatterId};
pub use histo1d::Histo1D;
pub use profile1d::Profile1D;
pub use scatter2d::{Scatter2D, ScatterPoint};
