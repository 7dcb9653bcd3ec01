//! # dl-core
//!
//! Core types for the dilepton analysis toolkit: four-momentum arithmetic,
//! final-state particles and events, PDG id helpers, and the angular
//! kinematics used by the analysis selections.
//!
//! All momenta and energies are in GeV.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod event;
pub mod kin;
pub mod pdg;
pub mod vec4;

pub use error::{Error, Result};
pub use event::{Event, Particle};
pub use vec4::Vec4;
