//! # dl-analysis
//!
//! The dilepton two-photon analysis: final-state projections, the
//! three-phase analysis lifecycle (init → analyze per event → finalize),
//! the dilepton plugin itself, a sequential/parallel run driver, and a toy
//! event generator for tests and demos.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod dilepton;
pub mod dressing;
pub mod jets;
pub mod met;
pub mod projection;
pub mod runner;
pub mod toys;

pub use analysis::{Analysis, EventOutcome, RunInfo};
pub use dilepton::{DileptonAnalysis, PROJECTION_KEYS};
pub use dressing::{DressedLepton, DressedLeptons};
pub use jets::{AntiKtJets, Jet};
pub use met::{MissingMomentum, MissingMomentumOutput};
pub use projection::{
    ChargedFinalState, FinalState, LeptonVetoedFinalState, ParticleCuts, Projection,
};
pub use runner::{run_parallel, run_sequential, RunSummary};
pub use toys::{generate_events, ToyConfig};
