//! Final-state projections.
//!
//! A projection computes a derived view of an event: a filtered particle
//! list, a composite object collection, or a global quantity. Projections
//! are declared once by an analysis and applied per event.

use dl_core::{pdg, Event, Particle, Vec4};

/// A derived per-event view.
pub trait Projection {
    /// What the projection produces for one event.
    type Output;

    /// Compute the projection on one event.
    fn project(&self, event: &Event) -> Self::Output;
}

/// Acceptance cuts applied to a single momentum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleCuts {
    /// Maximum |η|.
    pub max_abseta: f64,
    /// Minimum transverse momentum in GeV.
    pub min_pt: f64,
}

impl ParticleCuts {
    /// Whether the momentum passes the cuts.
    pub fn passes(&self, mom: &Vec4) -> bool {
        mom.abseta() < self.max_abseta && mom.pt() > self.min_pt
    }
}

/// All stable final-state particles inside an acceptance.
#[derive(Debug, Clone, Copy)]
pub struct FinalState {
    /// Acceptance cuts.
    pub cuts: ParticleCuts,
}

impl FinalState {
    /// Final state with the standard inclusive acceptance:
    /// `|η| < 5`, `pT > 0.5 GeV`.
    pub fn inclusive() -> Self {
        Self { cuts: ParticleCuts { max_abseta: 5.0, min_pt: 0.5 } }
    }
}

impl Projection for FinalState {
    type Output = Vec<Particle>;

    fn project(&self, event: &Event) -> Vec<Particle> {
        event
            .particles
            .iter()
            .filter(|p| self.cuts.passes(&p.mom))
            .copied()
            .collect()
    }
}

/// Charged subset of a [`FinalState`].
#[derive(Debug, Clone, Copy)]
pub struct ChargedFinalState {
    /// The underlying final state.
    pub fs: FinalState,
}

impl Projection for ChargedFinalState {
    type Output = Vec<Particle>;

    fn project(&self, event: &Event) -> Vec<Particle> {
        self.fs
            .project(event)
            .into_iter()
            .filter(|p| {
                if !pdg::is_known(p.pid) {
                    tracing::debug!(pid = p.pid, "unknown PDG id treated as neutral");
                }
                p.is_charged()
            })
            .collect()
    }
}

/// Charged final state with electron and muon tracks removed.
///
/// Only tracks that would pass the lepton-level cuts are vetoed; soft or
/// forward leptons stay in the collection.
#[derive(Debug, Clone, Copy)]
pub struct LeptonVetoedFinalState {
    /// The underlying charged final state.
    pub cfs: ChargedFinalState,
    /// Cuts identifying a lepton track to remove.
    pub lepton_cuts: ParticleCuts,
}

impl Projection for LeptonVetoedFinalState {
    type Output = Vec<Particle>;

    fn project(&self, event: &Event) -> Vec<Particle> {
        self.cfs
            .project(event)
            .into_iter()
            .filter(|p| {
                let is_lepton_track = matches!(p.abspid(), pdg::ELECTRON | pdg::MUON)
                    && self.lepton_cuts.passes(&p.mom);
                !is_lepton_track
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(pt: f64, eta: f64, pid: i32) -> Particle {
        Particle::new(Vec4::from_pt_eta_phi_m(pt, eta, 0.3, 0.0), pid)
    }

    #[test]
    fn final_state_applies_acceptance() {
        let ev = Event::new(vec![
            particle(1.0, 2.0, pdg::PI_PLUS),
            particle(0.3, 2.0, pdg::PI_PLUS),  // below pT cut
            particle(1.0, 5.5, pdg::PI_PLUS),  // outside eta
            particle(1.0, -4.9, pdg::PHOTON),
        ]);
        let fs = FinalState::inclusive().project(&ev);
        assert_eq!(fs.len(), 2);
    }

    #[test]
    fn charged_final_state_drops_neutrals() {
        let ev = Event::new(vec![
            particle(1.0, 0.0, pdg::PI_PLUS),
            particle(1.0, 0.0, pdg::PHOTON),
            particle(1.0, 0.0, -pdg::K_PLUS),
            particle(1.0, 0.0, pdg::NEUTRON),
        ]);
        let cfs = ChargedFinalState { fs: FinalState::inclusive() };
        assert_eq!(cfs.project(&ev).len(), 2);
    }

    #[test]
    fn lepton_veto_removes_hard_central_leptons_only() {
        let lepton_cuts = ParticleCuts { max_abseta: 2.5, min_pt: 10.0 };
        let proj = LeptonVetoedFinalState {
            cfs: ChargedFinalState { fs: FinalState::inclusive() },
            lepton_cuts,
        };
        let ev = Event::new(vec![
            particle(30.0, 1.0, pdg::MUON),      // vetoed
            particle(5.0, 1.0, -pdg::ELECTRON),  // soft, kept
            particle(30.0, 3.0, pdg::MUON),      // forward, kept
            particle(30.0, 1.0, pdg::PI_PLUS),   // hadron, kept
        ]);
        let out = proj.project(&ev);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|p| !(p.abspid() == pdg::MUON && p.pt() > 10.0 && p.abseta() < 2.5)));
    }
}
