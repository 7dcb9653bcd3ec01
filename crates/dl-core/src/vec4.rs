//! Four-momentum arithmetic.

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// A four-momentum `(px, py, pz, e)` in GeV.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec4 {
    /// x momentum component.
    pub px: f64,
    /// y momentum component.
    pub py: f64,
    /// z momentum component (beam axis).
    pub pz: f64,
    /// Energy.
    pub e: f64,
}

impl Vec4 {
    /// The zero four-momentum.
    pub const ZERO: Vec4 = Vec4 { px: 0.0, py: 0.0, pz: 0.0, e: 0.0 };

    /// Create from Cartesian components.
    pub fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self { px, py, pz, e }
    }

    /// Create from transverse momentum, pseudorapidity, azimuth and mass.
    pub fn from_pt_eta_phi_m(pt: f64, eta: f64, phi: f64, m: f64) -> Self {
        let px = pt * phi.cos();
        let py = pt * phi.sin();
        let pz = pt * eta.sinh();
        let e = (px * px + py * py + pz * pz + m * m).sqrt();
        Self { px, py, pz, e }
    }

    /// Transverse momentum.
    pub fn pt(&self) -> f64 {
        self.px.hypot(self.py)
    }

    /// Magnitude of the three-momentum.
    pub fn p(&self) -> f64 {
        (self.px * self.px + self.py * self.py + self.pz * self.pz).sqrt()
    }

    /// Pseudorapidity. Returns `±inf` for momenta exactly along the beam axis.
    pub fn eta(&self) -> f64 {
        (self.pz / self.pt()).asinh()
    }

    /// Absolute pseudorapidity.
    pub fn abseta(&self) -> f64 {
        self.eta().abs()
    }

    /// Rapidity `0.5 ln((E+pz)/(E-pz))`.
    pub fn rapidity(&self) -> f64 {
        0.5 * ((self.e + self.pz) / (self.e - self.pz)).ln()
    }

    /// Absolute rapidity.
    pub fn absrap(&self) -> f64 {
        self.rapidity().abs()
    }

    /// Azimuthal angle in `[0, 2π)`.
    pub fn phi(&self) -> f64 {
        let raw = self.py.atan2(self.px);
        if raw < 0.0 {
            raw + std::f64::consts::TAU
        } else {
            raw
        }
    }

    /// Invariant mass. Spacelike rounding noise is clamped to 0.
    pub fn mass(&self) -> f64 {
        let m2 = self.e * self.e
            - (self.px * self.px + self.py * self.py + self.pz * self.pz);
        m2.max(0.0).sqrt()
    }

    /// Transverse energy `E sinθ`. Zero for the zero vector.
    pub fn et(&self) -> f64 {
        let p = self.p();
        if p == 0.0 {
            0.0
        } else {
            self.e * self.pt() / p
        }
    }
}

impl Add for Vec4 {
    type Output = Vec4;

    fn add(self, rhs: Vec4) -> Vec4 {
        Vec4::new(self.px + rhs.px, self.py + rhs.py, self.pz + rhs.pz, self.e + rhs.e)
    }
}

impl AddAssign for Vec4 {
    fn add_assign(&mut self, rhs: Vec4) {
        self.px += rhs.px;
        self.py += rhs.py;
        self.pz += rhs.pz;
        self.e += rhs.e;
    }
}

impl Sum for Vec4 {
    fn sum<I: Iterator<Item = Vec4>>(iter: I) -> Vec4 {
        iter.fold(Vec4::ZERO, |acc, v| acc + v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn pt_eta_phi_roundtrip() {
        let v = Vec4::from_pt_eta_phi_m(35.0, 1.2, 0.7, 0.105);
        assert_relative_eq!(v.pt(), 35.0, max_relative = 1e-12);
        assert_relative_eq!(v.eta(), 1.2, max_relative = 1e-12);
        assert_relative_eq!(v.phi(), 0.7, max_relative = 1e-12);
        assert_relative_eq!(v.mass(), 0.105, max_relative = 1e-6);
    }

    #[test]
    fn phi_range_is_0_to_2pi() {
        let v = Vec4::new(1.0, -1.0, 0.0, 2.0);
        assert!(v.phi() > PI && v.phi() < 2.0 * PI);
        let w = Vec4::new(1.0, 1.0, 0.0, 2.0);
        assert_relative_eq!(w.phi(), PI / 4.0, max_relative = 1e-12);
    }

    #[test]
    fn rapidity_equals_eta_for_massless() {
        let v = Vec4::from_pt_eta_phi_m(10.0, -2.3, 1.0, 0.0);
        assert_relative_eq!(v.rapidity(), v.eta(), max_relative = 1e-9);
    }

    #[test]
    fn mass_of_pair() {
        // Two back-to-back massless 45 GeV momenta give m = 90 GeV.
        let a = Vec4::from_pt_eta_phi_m(45.0, 0.0, 0.0, 0.0);
        let b = Vec4::from_pt_eta_phi_m(45.0, 0.0, PI, 0.0);
        assert_relative_eq!((a + b).mass(), 90.0, max_relative = 1e-9);
    }

    #[test]
    fn spacelike_noise_clamps_to_zero_mass() {
        let v = Vec4::new(1.0, 0.0, 0.0, 1.0 - 1e-14);
        assert_eq!(v.mass(), 0.0);
    }

    #[test]
    fn sum_of_momenta() {
        let total: Vec4 = [
            Vec4::new(1.0, 0.0, 2.0, 3.0),
            Vec4::new(-1.0, 1.0, 0.0, 2.0),
        ]
        .into_iter()
        .sum();
        assert_eq!(total, Vec4::new(0.0, 1.0, 2.0, 5.0));
    }
}
