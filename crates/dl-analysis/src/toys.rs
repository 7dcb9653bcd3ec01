//! Toy event generation for tests and demos.
//!
//! Generates synthetic dilepton-like events: a fraction carry a hard
//! back-to-back muon pair (with azimuthal smearing), all carry soft
//! hadronic activity with Poisson multiplicity. Deterministic: event `i`
//! derives its RNG stream from `seed + i`.

use dl_core::{pdg, Error, Event, Particle, Result, Vec4};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Normal, Poisson};
use std::f64::consts::{PI, TAU};

const MUON_MASS: f64 = 0.105;
const PION_MASS: f64 = 0.14;

/// Toy generator configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToyConfig {
    /// Number of events to generate.
    pub n_events: usize,
    /// Base RNG seed.
    pub seed: u64,
    /// Fraction of events carrying a hard opposite-charge muon pair.
    pub signal_fraction: f64,
    /// Mean soft-particle multiplicity per event.
    pub soft_multiplicity: f64,
    /// Gaussian spread of the event weight around 1 (0 = unweighted).
    pub weight_spread: f64,
}

impl Default for ToyConfig {
    fn default() -> Self {
        Self {
            n_events: 1000,
            seed: 42,
            signal_fraction: 0.6,
            soft_multiplicity: 8.0,
            weight_spread: 0.0,
        }
    }
}

/// Generate a deterministic batch of toy events.
pub fn generate_events(config: &ToyConfig) -> Result<Vec<Event>> {
    if !(0.0..=1.0).contains(&config.signal_fraction) {
        return Err(Error::Validation(format!(
            "signal_fraction must be in [0, 1], got {}",
            config.signal_fraction
        )));
    }
    if config.soft_multiplicity < 0.0 || config.weight_spread < 0.0 {
        return Err(Error::Validation(
            "soft_multiplicity and weight_spread must be non-negative".into(),
        ));
    }

    // Lepton pT falls off with mean 15 GeV above a 12 GeV floor; soft pT
    // with mean 1 GeV above 0.3 GeV.
    let lepton_pt = Exp::new(1.0 / 15.0)
        .map_err(|e| Error::Validation(format!("lepton pT distribution: {e}")))?;
    let soft_pt = Exp::new(1.0)
        .map_err(|e| Error::Validation(format!("soft pT distribution: {e}")))?;
    let dphi_smear = Normal::new(0.0, 0.05)
        .map_err(|e| Error::Validation(format!("Δφ smearing: {e}")))?;
    let pt_smear = Normal::<f64>::new(0.0, 1.0)
        .map_err(|e| Error::Validation(format!("pT smearing: {e}")))?;

    let mut events = Vec::with_capacity(config.n_events);
    for i in 0..config.n_events {
        let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(i as u64));
        let mut particles = Vec::new();

        if rng.random_bool(config.signal_fraction) {
            let pt1 = 12.0 + lepton_pt.sample(&mut rng);
            let pt2 = (pt1 + pt_smear.sample(&mut rng)).max(10.5);
            let eta1 = rng.random_range(-2.3..2.3);
            let eta2 = rng.random_range(-2.3..2.3);
            let phi1 = rng.random_range(0.0..TAU);
            let phi2 = (phi1 + PI + dphi_smear.sample(&mut rng)).rem_euclid(TAU);
            let sign = if rng.random_bool(0.5) { 1 } else { -1 };
            particles.push(Particle::new(
                Vec4::from_pt_eta_phi_m(pt1, eta1, phi1, MUON_MASS),
                sign * pdg::MUON,
            ));
            particles.push(Particle::new(
                Vec4::from_pt_eta_phi_m(pt2, eta2, phi2, MUON_MASS),
                -sign * pdg::MUON,
            ));
        }

        let n_soft = if config.soft_multiplicity > 0.0 {
            let poisson = Poisson::new(config.soft_multiplicity)
                .map_err(|e| Error::Validation(format!("soft multiplicity: {e}")))?;
            poisson.sample(&mut rng) as usize
        } else {
            0
        };
        for _ in 0..n_soft {
            let (pid, mass) = match rng.random_range(0..4) {
                0 => (pdg::PI_PLUS, PION_MASS),
                1 => (-pdg::PI_PLUS, PION_MASS),
                2 => (pdg::PI_ZERO, PION_MASS),
                _ => (pdg::PHOTON, 0.0),
            };
            let pt = 0.3 + soft_pt.sample(&mut rng);
            let eta = rng.random_range(-4.8..4.8);
            let phi = rng.random_range(0.0..TAU);
            let mut p = Particle::new(Vec4::from_pt_eta_phi_m(pt, eta, phi, mass), pid);
            // Soft activity models hadronization products, not prompt
            // radiation, so it must not take part in lepton dressing.
            p.prompt = false;
            particles.push(p);
        }

        let weight = if config.weight_spread > 0.0 {
            let smear = Normal::new(1.0, config.weight_spread)
                .map_err(|e| Error::Validation(format!("weight smearing: {e}")))?;
            smear.sample(&mut rng).max(0.0)
        } else {
            1.0
        };
        events.push(Event::with_weight(particles, weight));
    }
    Ok(events)
}
