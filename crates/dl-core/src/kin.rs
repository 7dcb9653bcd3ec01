//! Angular kinematics helpers.

use crate::vec4::Vec4;
use std::f64::consts::PI;

/// Azimuthal separation wrapped into `[0, π]`.
pub fn delta_phi(phi1: f64, phi2: f64) -> f64 {
    let mut d = (phi1 - phi2).rem_euclid(2.0 * PI);
    if d > PI {
        d = 2.0 * PI - d;
    }
    d
}

/// Pseudorapidity separation.
pub fn delta_eta(eta1: f64, eta2: f64) -> f64 {
    (eta1 - eta2).abs()
}

/// Angular distance `ΔR = sqrt(Δη² + Δφ²)` between two momenta,
/// pseudorapidity based.
pub fn delta_r(a: &Vec4, b: &Vec4) -> f64 {
    let deta = a.eta() - b.eta();
    let dphi = delta_phi(a.phi(), b.phi());
    (deta * deta + dphi * dphi).sqrt()
}

/// Acoplanarity `|1 − (φ1 − φ2)/π|` from the RAW azimuth difference.
///
/// Note: the difference is intentionally not wrapped into `[0, π]`; with
/// both azimuths in `[0, 2π)` the result depends on which lepton sits at
/// larger φ. This reproduces the analysis definition as-is.
pub fn acoplanarity_raw(phi1: f64, phi2: f64) -> f64 {
    (1.0 - (phi1 - phi2) / PI).abs()
}
