//! PDG Monte Carlo particle ids and charge lookup.
//!
//! Only the species the analysis selects on or commonly encounters in a
//! final state are tabulated. Unknown ids are treated as neutral; callers
//! that care can log them (see the charged final-state projection).

/// Electron PDG id.
pub const ELECTRON: i32 = 11;
/// Electron neutrino PDG id.
pub const NU_E: i32 = 12;
/// Muon PDG id.
pub const MUON: i32 = 13;
/// Muon neutrino PDG id.
pub const NU_MU: i32 = 14;
/// Tau PDG id.
pub const TAU: i32 = 15;
/// Tau neutrino PDG id.
pub const NU_TAU: i32 = 16;
/// Photon PDG id.
pub const PHOTON: i32 = 22;
/// Charged pion PDG id.
pub const PI_PLUS: i32 = 211;
/// Neutral pion PDG id.
pub const PI_ZERO: i32 = 111;
/// Charged kaon PDG id.
pub const K_PLUS: i32 = 321;
/// Neutral long kaon PDG id.
pub const K0_LONG: i32 = 130;
/// Neutral short kaon PDG id.
pub const K0_SHORT: i32 = 310;
/// Proton PDG id.
pub const PROTON: i32 = 2212;
/// Neutron PDG id.
pub const NEUTRON: i32 = 2112;

/// Three times the electric charge of the particle with the given id.
///
/// Sign convention: particles with positive id that are negatively charged
/// (e⁻ = 11, μ⁻ = 13, τ⁻ = 15) return −3; their antiparticles (negative id)
/// return +3. Unknown ids return 0.
pub fn charge3(pid: i32) -> i32 {
    let sign = if pid < 0 { -1 } else { 1 };
    let q3 = match pid.abs() {
        ELECTRON | MUON | TAU => -3,
        PI_PLUS | K_PLUS | PROTON => 3,
        _ => 0,
    };
    sign * q3
}

/// Electric charge in units of `e`.
pub fn charge(pid: i32) -> f64 {
    charge3(pid) as f64 / 3.0
}

/// Whether the particle with the given id carries electric charge.
pub fn is_charged(pid: i32) -> bool {
    charge3(pid) != 0
}

/// Whether the id is a neutrino (invisible to the detector).
pub fn is_neutrino(pid: i32) -> bool {
    matches!(pid.abs(), NU_E | NU_MU | NU_TAU)
}

/// Whether the id is in the charge table.
pub fn is_known(pid: i32) -> bool {
    matches!(
        pid.abs(),
        ELECTRON
            | NU_E
            | MUON
            | NU_MU
            | TAU
            | NU_TAU
            | PHOTON
            | PI_PLUS
            | PI_ZERO
            | K_PLUS
            | K0_LONG
            | K0_SHORT
            | PROTON
            | NEUTRON
    )
}

/// Whether the id is a charged lepton (e, μ or τ).
pub fn is_charged_lepton(pid: i32) -> bool {
    matches!(pid.abs(), ELECTRON | MUON | TAU)
}
