//! Lepton dressing: bare leptons combined with nearby radiated photons.

use crate::projection::{ParticleCuts, Projection};
use dl_core::{kin, pdg, Event, Particle, Vec4};

/// A bare lepton plus the prompt photons radiated close to it.
#[derive(Debug, Clone, PartialEq)]
pub struct DressedLepton {
    /// Combined four-momentum (bare lepton + photons).
    pub mom: Vec4,
    /// The bare lepton.
    pub bare: Particle,
    /// Photons absorbed into the dressed momentum.
    pub photons: Vec<Particle>,
}

impl DressedLepton {
    /// Electric charge, from the bare lepton id.
    pub fn charge(&self) -> f64 {
        self.bare.charge()
    }

    /// PDG id of the bare lepton.
    pub fn pid(&self) -> i32 {
        self.bare.pid
    }

    /// Transverse momentum of the dressed system.
    pub fn pt(&self) -> f64 {
        self.mom.pt()
    }
}

/// Builds dressed electrons and muons from prompt leptons and photons.
///
/// Each prompt photon within `cone` (ΔR) of at least one bare lepton is
/// added to the nearest such lepton, so no photon is counted twice. The
/// acceptance cuts apply to the dressed momentum.
#[derive(Debug, Clone, Copy)]
pub struct DressedLeptons {
    /// Dressing cone ΔR.
    pub cone: f64,
    /// Cuts on the dressed momentum.
    pub cuts: ParticleCuts,
    /// Drop bare leptons that descend from tau decays.
    pub veto_tau_descendants: bool,
}

impl DressedLeptons {
    /// Standard dressing for this analysis: ΔR < 0.1,
    /// dressed `|η| < 2.5`, `pT > 10 GeV`, tau descendants kept.
    pub fn standard() -> Self {
        Self {
            cone: 0.1,
            cuts: ParticleCuts { max_abseta: 2.5, min_pt: 10.0 },
            veto_tau_descendants: false,
        }
    }

    /// Same dressing, excluding leptons from tau decays.
    pub fn standard_no_tau() -> Self {
        Self { veto_tau_descendants: true, ..Self::standard() }
    }
}

impl Projection for DressedLeptons {
    type Output = Vec<DressedLepton>;

    fn project(&self, event: &Event) -> Vec<DressedLepton> {
        let bare: Vec<&Particle> = event
            .particles
            .iter()
            .filter(|p| {
                p.prompt
                    && matches!(p.abspid(), pdg::ELECTRON | pdg::MUON)
                    && !(self.veto_tau_descendants && p.from_tau)
            })
            .collect();
        let photons = event
            .particles
            .iter()
            .filter(|p| p.prompt && p.pid == pdg::PHOTON);

        let mut momenta: Vec<Vec4> = bare.iter().map(|l| l.mom).collect();
        let mut absorbed: Vec<Vec<Particle>> = vec![Vec::new(); bare.len()];
        for photon in photons {
            let nearest = bare
                .iter()
                .enumerate()
                .map(|(i, l)| (i, kin::delta_r(&photon.mom, &l.mom)))
                .filter(|&(_, dr)| dr < self.cone)
                .min_by(|a, b| a.1.total_cmp(&b.1));
            if let Some((i, _)) = nearest {
                momenta[i] += photon.mom;
                absorbed[i].push(*photon);
            }
        }

        let mut dressed: Vec<DressedLepton> = bare
            .into_iter()
            .zip(momenta)
            .zip(absorbed)
            .filter(|((_, mom), _)| self.cuts.passes(mom))
            .map(|((lepton, mom), photons)| DressedLepton { mom, bare: *lepton, photons })
            .collect();
        dressed.sort_by(|a, b| b.pt().total_cmp(&a.pt()));
        dressed
    }
}
