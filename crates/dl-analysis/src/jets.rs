//! Anti-kT jet clustering.

use crate::projection::{FinalState, Projection};
use dl_core::{kin, pdg, Event, Particle, Vec4};

/// A clustered jet.
#[derive(Debug, Clone, PartialEq)]
pub struct Jet {
    /// Jet four-momentum (E-scheme sum of constituents).
    pub mom: Vec4,
    /// Clustered constituents.
    pub constituents: Vec<Particle>,
}

impl Jet {
    /// Jet transverse momentum.
    pub fn pt(&self) -> f64 {
        self.mom.pt()
    }
}

/// Anti-kT sequential recombination over a final state.
///
/// Muons and neutrinos are excluded from the clustering input. Distances
/// use the rapidity–azimuth metric; recombination is the E-scheme
/// four-momentum sum. Output jets are sorted by descending pT.
#[derive(Debug, Clone, Copy)]
pub struct AntiKtJets {
    /// Input final state.
    pub fs: FinalState,
    /// Jet radius parameter.
    pub radius: f64,
    /// Minimum jet pT in GeV (0 keeps everything).
    pub min_pt: f64,
}

impl AntiKtJets {
    /// The analysis configuration: R = 0.4 over the inclusive final state.
    pub fn standard() -> Self {
        Self { fs: FinalState::inclusive(), radius: 0.4, min_pt: 0.0 }
    }
}

struct PseudoJet {
    mom: Vec4,
    constituents: Vec<Particle>,
}

fn rap_phi_dist2(a: &Vec4, b: &Vec4) -> f64 {
    let drap = a.rapidity() - b.rapidity();
    let dphi = kin::delta_phi(a.phi(), b.phi());
    drap * drap + dphi * dphi
}

impl Projection for AntiKtJets {
    type Output = Vec<Jet>;

    fn project(&self, event: &Event) -> Vec<Jet> {
        let mut pending: Vec<PseudoJet> = self
            .fs
            .project(event)
            .into_iter()
            .filter(|p| p.abspid() != pdg::MUON && !pdg::is_neutrino(p.pid))
            .map(|p| PseudoJet { mom: p.mom, constituents: vec![p] })
            .collect();

        let r2 = self.radius * self.radius;
        let mut jets: Vec<Jet> = Vec::new();

        while !pending.is_empty() {
            // Smallest anti-kT distance: beam distance 1/pT² per pseudo-jet,
            // pair distance min(1/pT²) · ΔR²/R².
            let mut best_beam = (0usize, f64::INFINITY);
            for (i, pj) in pending.iter().enumerate() {
                let d = pj.mom.pt().powi(-2);
                if d < best_beam.1 {
                    best_beam = (i, d);
                }
            }
            let mut best_pair: Option<(usize, usize, f64)> = None;
            for i in 0..pending.len() {
                for j in (i + 1)..pending.len() {
                    let kt = pending[i].mom.pt().powi(-2).min(pending[j].mom.pt().powi(-2));
                    let d = kt * rap_phi_dist2(&pending[i].mom, &pending[j].mom) / r2;
                    if best_pair.is_none_or(|(_, _, bd)| d < bd) {
                        best_pair = Some((i, j, d));
                    }
                }
            }

            match best_pair {
                Some((i, j, d)) if d < best_beam.1 => {
                    let merged = pending.swap_remove(j);
                    pending[i].mom += merged.mom;
                    pending[i].constituents.extend(merged.constituents);
                }
                _ => {
                    let done = pending.swap_remove(best_beam.0);
                    if done.mom.pt() >= self.min_pt {
                        jets.push(Jet { mom: done.mom, constituents: done.constituents });
                    }
                }
            }
        }

        jets.sort_by(|a, b| b.pt().total_cmp(&a.pt()));
        jets
    }
}
