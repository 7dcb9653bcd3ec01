//! Missing transverse momentum.

use crate::projection::{FinalState, Projection};
use dl_core::{pdg, Event, Vec4};

/// Visible-momentum sum and the derived missing momentum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissingMomentumOutput {
    /// Vector sum of visible momenta in the acceptance.
    pub visible: Vec4,
}

impl MissingMomentumOutput {
    /// Missing transverse momentum vector `(−Σpx, −Σpy)` as a four-vector
    /// with zero pz and the transverse magnitude as energy.
    pub fn missing(&self) -> Vec4 {
        let met = self.met();
        Vec4::new(-self.visible.px, -self.visible.py, 0.0, met)
    }

    /// Magnitude of the missing transverse momentum.
    pub fn met(&self) -> f64 {
        self.visible.pt()
    }
}

/// Missing momentum from the visible part of a final state.
///
/// Neutrinos are excluded from the visible sum.
#[derive(Debug, Clone, Copy)]
pub struct MissingMomentum {
    /// Input final state.
    pub fs: FinalState,
}

impl MissingMomentum {
    /// Missing momentum over the inclusive final state.
    pub fn standard() -> Self {
        Self { fs: FinalState::inclusive() }
    }
}

impl Projection for MissingMomentum {
    type Output = MissingMomentumOutput;

    fn project(&self, event: &Event) -> MissingMomentumOutput {
        let visible: Vec4 = self
            .fs
            .project(event)
            .into_iter()
            .filter(|p| !pdg::is_neutrino(p.pid))
            .map(|p| p.mom)
            .sum();
        MissingMomentumOutput { visible }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use dl_core::Particle;

    #[test]
    fn balanced_event_has_no_met() {
        let ev = Event::new(vec![
            Particle::new(Vec4::from_pt_eta_phi_m(20.0, 0.3, 1.0, 0.0), pdg::PI_PLUS),
            Particle::new(
                Vec4::from_pt_eta_phi_m(20.0, -0.7, 1.0 + std::f64::consts::PI, 0.0),
                -pdg::PI_PLUS,
            ),
        ]);
        let out = MissingMomentum::standard().project(&ev);
        assert_relative_eq!(out.met(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn neutrino_creates_met() {
        let ev = Event::new(vec![
            Particle::new(Vec4::from_pt_eta_phi_m(20.0, 0.0, 1.0, 0.0), pdg::PI_PLUS),
            Particle::new(
                Vec4::from_pt_eta_phi_m(20.0, 0.0, 1.0 + std::f64::consts::PI, 0.0),
                pdg::NU_MU,
            ),
        ]);
        let out = MissingMomentum::standard().project(&ev);
        assert_relative_eq!(out.met(), 20.0, max_relative = 1e-9);
        assert_relative_eq!(out.missing().phi(), ev.particles[1].phi(), max_relative = 1e-9);
    }
}
