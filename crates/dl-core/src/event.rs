//! Final-state particles and events.

use crate::pdg;
use crate::vec4::Vec4;
use serde::{Deserialize, Serialize};

/// A stable final-state particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Four-momentum in GeV.
    #[serde(flatten)]
    pub mom: Vec4,
    /// PDG Monte Carlo id.
    pub pid: i32,
    /// Whether the particle is prompt (not produced in a hadron decay).
    #[serde(default)]
    pub prompt: bool,
    /// Whether the particle descends from a tau decay.
    #[serde(default)]
    pub from_tau: bool,
}

impl Particle {
    /// Create a prompt particle from a momentum and PDG id.
    pub fn new(mom: Vec4, pid: i32) -> Self {
        Self { mom, pid, prompt: true, from_tau: false }
    }

    /// Absolute PDG id.
    pub fn abspid(&self) -> i32 {
        self.pid.abs()
    }

    /// Electric charge in units of `e`.
    pub fn charge(&self) -> f64 {
        pdg::charge(self.pid)
    }

    /// Whether the particle carries electric charge.
    pub fn is_charged(&self) -> bool {
        pdg::is_charged(self.pid)
    }

    /// Transverse momentum.
    pub fn pt(&self) -> f64 {
        self.mom.pt()
    }

    /// Energy.
    pub fn energy(&self) -> f64 {
        self.mom.e
    }

    /// Pseudorapidity.
    pub fn eta(&self) -> f64 {
        self.mom.eta()
    }

    /// Absolute pseudorapidity.
    pub fn abseta(&self) -> f64 {
        self.mom.abseta()
    }

    /// Rapidity.
    pub fn rapidity(&self) -> f64 {
        self.mom.rapidity()
    }

    /// Absolute rapidity.
    pub fn absrap(&self) -> f64 {
        self.mom.absrap()
    }

    /// Azimuthal angle in `[0, 2π)`.
    pub fn phi(&self) -> f64 {
        self.mom.phi()
    }

    /// Transverse energy.
    pub fn et(&self) -> f64 {
        self.mom.et()
    }
}

fn default_weight() -> f64 {
    1.0
}

/// One simulated collision event: a final-state particle list plus the
/// generator weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Stable final-state particles.
    pub particles: Vec<Particle>,
    /// Generator event weight (1.0 when absent in the input).
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl Event {
    /// Create an unweighted event.
    pub fn new(particles: Vec<Particle>) -> Self {
        Self { particles, weight: 1.0 }
    }

    /// Create a weighted event.
    pub fn with_weight(particles: Vec<Particle>, weight: f64) -> Self {
        Self { particles, weight }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_accessors() {
        let p = Particle::new(Vec4::from_pt_eta_phi_m(20.0, 0.5, 1.0, 0.0), -pdg::MUON);
        assert_eq!(p.abspid(), pdg::MUON);
        assert_eq!(p.charge(), 1.0);
        assert!(p.is_charged());
        assert!((p.pt() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn event_weight_defaults_in_json() {
        let json = r#"{"particles":[{"px":1.0,"py":0.0,"pz":0.0,"e":1.0,"pid":22}]}"#;
        let ev: Event = serde_json::from_str(json).unwrap();
        assert_eq!(ev.weight, 1.0);
        assert_eq!(ev.particles.len(), 1);
        assert!(!ev.particles[0].prompt);
    }

    #[test]
    fn event_roundtrips_through_json() {
        let ev = Event::with_weight(
            vec![Particle::new(Vec4::new(1.0, 2.0, 3.0, 4.0), pdg::PI_PLUS)],
            0.7,
        );
        let json = serde_json::to_string(&ev).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ev);
    }
}
