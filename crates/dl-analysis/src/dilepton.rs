//! The dilepton two-photon analysis plugin.
//!
//! Selects events with exactly two opposite-charge dressed leptons and
//! accumulates dilepton kinematics, alongside unconditional inclusive
//! particle spectra filled for every event.

use crate::analysis::{Analysis, EventOutcome, RunInfo};
use crate::dressing::DressedLeptons;
use crate::jets::AntiKtJets;
use crate::met::MissingMomentum;
use crate::projection::{
    ChargedFinalState, FinalState, LeptonVetoedFinalState, ParticleCuts, Projection,
};
use dl_core::{kin, Error, Event, Result, Vec4};
use dl_hist::{Book, HistoId, ProfileId, ScatterId};
use std::f64::consts::TAU;

/// Sentinel for lepton η when the lepton is missing.
const ETA_SENTINEL: f64 = -15.0;
/// Sentinel for mass/pT/Δφ/acoplanarity when a lepton is missing.
const KIN_SENTINEL: f64 = -1.0;

/// String keys of the declared projections, in declaration order.
pub const PROJECTION_KEYS: [&str; 7] =
    ["FS", "CFS", "CFS_NL", "leptons", "dressed_leptons_no_tau", "jets", "MET"];

struct Projections {
    fs: FinalState,
    cfs: ChargedFinalState,
    cfs_no_lepton: LeptonVetoedFinalState,
    leptons: DressedLeptons,
    // Declared alongside the others but not consumed in the event loop.
    #[allow(dead_code)]
    leptons_no_tau: DressedLeptons,
    #[allow(dead_code)]
    jets: AntiKtJets,
    #[allow(dead_code)]
    met: MissingMomentum,
}

impl Projections {
    fn declare() -> Self {
        let fs = FinalState::inclusive();
        let cfs = ChargedFinalState { fs };
        let lepton_cuts = ParticleCuts { max_abseta: 2.5, min_pt: 10.0 };
        Self {
            fs,
            cfs,
            cfs_no_lepton: LeptonVetoedFinalState { cfs, lepton_cuts },
            leptons: DressedLeptons::standard(),
            leptons_no_tau: DressedLeptons::standard_no_tau(),
            jets: AntiKtJets::standard(),
            met: MissingMomentum::standard(),
        }
    }
}

/// Handles to every booked accumulator. Bound once in `init`, never rebound.
#[derive(Debug, Clone, Copy)]
struct Hists {
    // Inclusive spectra (shape-normalized in finalize).
    mult: HistoId,
    mult_ch: HistoId,
    pt: HistoId,
    pt_ch: HistoId,
    e: HistoId,
    e_ch: HistoId,
    eta: HistoId,
    eta_ch: HistoId,
    rapidity: HistoId,
    rapidity_ch: HistoId,
    phi: HistoId,
    phi_ch: HistoId,
    eta_sum_et: ProfileId,

    // Sign-split working histograms feeding the ± ratios.
    tmp_eta_plus: HistoId,
    tmp_eta_minus: HistoId,
    tmp_eta_ch_plus: HistoId,
    tmp_eta_ch_minus: HistoId,
    tmp_rap_plus: HistoId,
    tmp_rap_minus: HistoId,
    tmp_rap_ch_plus: HistoId,
    tmp_rap_ch_minus: HistoId,

    // Ratio scatters built in finalize.
    eta_pm_ratio: ScatterId,
    eta_ch_pm_ratio: ScatterId,
    rap_pm_ratio: ScatterId,
    rap_ch_pm_ratio: ScatterId,

    // Post-selection histograms (absolute-normalized in finalize).
    lepton_pt1: HistoId,
    lepton_pt2: HistoId,
    lepton_eta1: HistoId,
    lepton_eta2: HistoId,
    mll: HistoId,
    ptll: HistoId,
    dphill: HistoId,
    acoll: HistoId,
    mult_ch_nl: HistoId,
    pt_ch_nl: HistoId,
    eta_ch_nl: HistoId,
}

impl Hists {
    fn book(book: &mut Book) -> Result<Self> {
        Ok(Self {
            mult: book.histo1d("Mult", 100, -0.5, 99.5)?,
            mult_ch: book.histo1d("MultCh", 100, -0.5, 99.5)?,
            pt: book.histo1d("Pt", 300, 0.0, 300.0)?,
            pt_ch: book.histo1d("PtCh", 300, 0.0, 300.0)?,
            e: book.histo1d("E", 100, 0.0, 200.0)?,
            e_ch: book.histo1d("ECh", 100, 0.0, 200.0)?,
            eta_sum_et: book.profile1d("EtaSumEt", 25, 0.0, 5.0)?,
            eta: book.histo1d("Eta", 50, -5.0, 5.0)?,
            eta_ch: book.histo1d("EtaCh", 50, -5.0, 5.0)?,
            tmp_eta_plus: book.histo1d("TMP/EtaPlus", 25, 0.0, 5.0)?,
            tmp_eta_minus: book.histo1d("TMP/EtaMinus", 25, 0.0, 5.0)?,
            tmp_eta_ch_plus: book.histo1d("TMP/EtaChPlus", 25, 0.0, 5.0)?,
            tmp_eta_ch_minus: book.histo1d("TMP/EtaChMinus", 25, 0.0, 5.0)?,
            rapidity: book.histo1d("Rapidity", 50, -5.0, 5.0)?,
            rapidity_ch: book.histo1d("RapidityCh", 50, -5.0, 5.0)?,
            tmp_rap_plus: book.histo1d("TMP/RapPlus", 25, 0.0, 5.0)?,
            tmp_rap_minus: book.histo1d("TMP/RapMinus", 25, 0.0, 5.0)?,
            tmp_rap_ch_plus: book.histo1d("TMP/RapChPlus", 25, 0.0, 5.0)?,
            tmp_rap_ch_minus: book.histo1d("TMP/RapChMinus", 25, 0.0, 5.0)?,
            phi: book.histo1d("Phi", 50, 0.0, TAU)?,
            phi_ch: book.histo1d("PhiCh", 50, 0.0, TAU)?,
            eta_pm_ratio: book.scatter2d("EtaPMRatio")?,
            eta_ch_pm_ratio: book.scatter2d("EtaChPMRatio")?,
            rap_pm_ratio: book.scatter2d("RapidityPMRatio")?,
            rap_ch_pm_ratio: book.scatter2d("RapidityChPMRatio")?,
            lepton_pt1: book.histo1d("ptlepton1", 100, 0.0, 100.0)?,
            lepton_pt2: book.histo1d("ptlepton2", 100, 0.0, 100.0)?,
            lepton_eta1: book.histo1d("etalepton1", 50, -2.5, 2.5)?,
            lepton_eta2: book.histo1d("etalepton2", 50, -2.5, 2.5)?,
            mll: book.histo1d("mll", 500, 0.0, 500.0)?,
            ptll: book.histo1d("ptll", 500, 0.0, 500.0)?,
            dphill: book.histo1d("Dphill", 64, -3.2, 3.2)?,
            acoll: book.histo1d("Acoll", 100, 0.0, 1.0)?,
            mult_ch_nl: book.histo1d("MultChNL", 50, -0.5, 49.5)?,
            pt_ch_nl: book.histo1d("PtChNL", 500, 0.0, 500.0)?,
            eta_ch_nl: book.histo1d("EtaChNL", 100, -5.0, 5.0)?,
        })
    }
}

/// The dilepton analysis.
pub struct DileptonAnalysis {
    projections: Projections,
    book: Book,
    hists: Option<Hists>,
}

impl DileptonAnalysis {
    /// Create an unbooked analysis; `init` must run before the first event.
    pub fn new() -> Self {
        Self { projections: Projections::declare(), book: Book::new(), hists: None }
    }

    fn hists(&self) -> Result<Hists> {
        self.hists
            .ok_or_else(|| Error::Validation("analysis used before init".into()))
    }
}

impl Default for DileptonAnalysis {
    fn default() -> Self {
        Self::new()
    }
}

impl Analysis for DileptonAnalysis {
    fn init(&mut self) -> Result<()> {
        if self.hists.is_some() {
            return Err(Error::Validation("init called twice".into()));
        }
        self.hists = Some(Hists::book(&mut self.book)?);
        Ok(())
    }

    fn analyze(&mut self, event: &Event) -> Result<EventOutcome> {
        let h = self.hists()?;
        let w = event.weight;

        // Dressed leptons, sorted by pT.
        let leptons = self.projections.leptons.project(event);
        let fs = self.projections.fs.project(event);
        let cfs = self.projections.cfs.project(event);
        let cfs_no_lepton = self.projections.cfs_no_lepton.project(event);

        // Dilepton quantities from the two leading leptons, with finite
        // sentinels when leptons are missing so everything can be computed
        // before the veto.
        let l1 = leptons.first().map(|l| l.mom).unwrap_or(Vec4::ZERO);
        let l2 = leptons.get(1).map(|l| l.mom).unwrap_or(Vec4::ZERO);
        let dilepton = if leptons.len() > 1 { l1 + l2 } else { Vec4::ZERO };

        let eta_l1 = if leptons.is_empty() { ETA_SENTINEL } else { l1.eta() };
        let eta_l2 = if leptons.len() > 1 { l2.eta() } else { ETA_SENTINEL };
        let pt_l1 = if leptons.is_empty() { KIN_SENTINEL } else { l1.pt() };
        let pt_l2 = if leptons.len() > 1 { l2.pt() } else { KIN_SENTINEL };

        let (mll, ptll, dphill, aco) = if leptons.len() > 1 {
            (
                dilepton.mass(),
                dilepton.pt(),
                kin::delta_phi(l1.phi(), l2.phi()),
                kin::acoplanarity_raw(l1.phi(), l2.phi()),
            )
        } else {
            (KIN_SENTINEL, KIN_SENTINEL, KIN_SENTINEL, KIN_SENTINEL)
        };

        // Unconditional inclusive fills: every final-state particle.
        let book = &mut self.book;
        book.histo_mut(h.mult).fill_w(fs.len() as f64, w);
        for p in &fs {
            book.histo_mut(h.eta).fill_w(p.eta(), w);
            book.profile_mut(h.eta_sum_et).fill_w(p.abseta(), p.et(), w);
            let eta_split = if p.eta() > 0.0 { h.tmp_eta_plus } else { h.tmp_eta_minus };
            book.histo_mut(eta_split).fill_w(p.abseta(), w);

            book.histo_mut(h.rapidity).fill_w(p.rapidity(), w);
            let rap_split = if p.rapidity() > 0.0 { h.tmp_rap_plus } else { h.tmp_rap_minus };
            book.histo_mut(rap_split).fill_w(p.absrap(), w);

            book.histo_mut(h.pt).fill_w(p.pt(), w);
            book.histo_mut(h.e).fill_w(p.energy(), w);
            book.histo_mut(h.phi).fill_w(p.phi(), w);
        }

        // Same for the charged subset.
        tracing::debug!(multiplicity = cfs.len(), "total charged multiplicity");
        book.histo_mut(h.mult_ch).fill_w(cfs.len() as f64, w);
        for p in &cfs {
            book.histo_mut(h.eta_ch).fill_w(p.eta(), w);
            let eta_split = if p.eta() > 0.0 { h.tmp_eta_ch_plus } else { h.tmp_eta_ch_minus };
            book.histo_mut(eta_split).fill_w(p.abseta(), w);

            book.histo_mut(h.rapidity_ch).fill_w(p.rapidity(), w);
            let rap_split = if p.rapidity() > 0.0 { h.tmp_rap_ch_plus } else { h.tmp_rap_ch_minus };
            book.histo_mut(rap_split).fill_w(p.absrap(), w);

            book.histo_mut(h.pt_ch).fill_w(p.pt(), w);
            book.histo_mut(h.e_ch).fill_w(p.energy(), w);
            book.histo_mut(h.phi_ch).fill_w(p.phi(), w);
        }

        // Selection: exactly two dressed leptons ...
        if leptons.len() != 2 {
            return Ok(EventOutcome::Vetoed);
        }
        // ... with opposite charge.
        if leptons[0].charge() == leptons[1].charge() {
            return Ok(EventOutcome::Vetoed);
        }

        book.histo_mut(h.mll).fill_w(mll, w);
        book.histo_mut(h.ptll).fill_w(ptll, w);
        book.histo_mut(h.dphill).fill_w(dphill, w);
        book.histo_mut(h.acoll).fill_w(aco, w);

        book.histo_mut(h.lepton_pt1).fill_w(pt_l1, w);
        book.histo_mut(h.lepton_pt2).fill_w(pt_l2, w);
        book.histo_mut(h.lepton_eta1).fill_w(eta_l1, w);
        book.histo_mut(h.lepton_eta2).fill_w(eta_l2, w);

        book.histo_mut(h.mult_ch_nl).fill_w(cfs_no_lepton.len() as f64, w);
        for p in &cfs_no_lepton {
            book.histo_mut(h.eta_ch_nl).fill_w(p.eta(), w);
            book.histo_mut(h.pt_ch_nl).fill_w(p.pt(), w);
        }

        Ok(EventOutcome::Accepted)
    }

    fn finalize(&mut self, run: &RunInfo) -> Result<()> {
        let h = self.hists()?;
        if run.sum_of_weights == 0.0 {
            return Err(Error::Computation(
                "cannot normalize: sum of weights is zero".into(),
            ));
        }
        let normfac = run.cross_section_pb / run.sum_of_weights;
        let book = &mut self.book;

        // Post-selection histograms carry absolute normalization.
        for id in [
            h.mll,
            h.ptll,
            h.dphill,
            h.acoll,
            h.lepton_pt1,
            h.lepton_pt2,
            h.lepton_eta1,
            h.lepton_eta2,
            h.mult_ch_nl,
            h.pt_ch_nl,
            h.eta_ch_nl,
        ] {
            book.histo_mut(id).scale(normfac);
        }

        // Inclusive spectra are shapes: unit area.
        for id in [
            h.mult,
            h.eta,
            h.rapidity,
            h.pt,
            h.e,
            h.phi,
            h.mult_ch,
            h.eta_ch,
            h.rapidity_ch,
            h.pt_ch,
            h.e_ch,
            h.phi_ch,
        ] {
            book.histo_mut(id).normalize(1.0);
        }

        // Forward/backward ratios from the sign-split temporaries.
        book.divide(h.tmp_eta_plus, h.tmp_eta_minus, h.eta_pm_ratio)?;
        book.divide(h.tmp_eta_ch_plus, h.tmp_eta_ch_minus, h.eta_ch_pm_ratio)?;
        book.divide(h.tmp_rap_plus, h.tmp_rap_minus, h.rap_pm_ratio)?;
        book.divide(h.tmp_rap_ch_plus, h.tmp_rap_ch_minus, h.rap_ch_pm_ratio)?;

        Ok(())
    }

    fn book(&self) -> &Book {
        &self.book
    }

    fn merge_from(&mut self, other: Self) -> Result<()> {
        self.book.merge(&other.book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dl_core::{pdg, Particle};

    fn muon(pt: f64, eta: f64, phi: f64, pid: i32) -> Particle {
        Particle::new(Vec4::from_pt_eta_phi_m(pt, eta, phi, 0.105), pid)
    }

    #[test]
    fn projections_declared_under_expected_keys() {
        assert_eq!(PROJECTION_KEYS.len(), 7);
        assert!(PROJECTION_KEYS.contains(&"leptons"));
        assert!(PROJECTION_KEYS.contains(&"MET"));
    }

    #[test]
    fn analyze_before_init_is_an_error() {
        let mut ana = DileptonAnalysis::new();
        let ev = Event::new(vec![]);
        assert!(ana.analyze(&ev).is_err());
    }

    #[test]
    fn init_twice_is_an_error() {
        let mut ana = DileptonAnalysis::new();
        ana.init().unwrap();
        assert!(ana.init().is_err());
    }

    #[test]
    fn books_the_full_accumulator_set() {
        let mut ana = DileptonAnalysis::new();
        ana.init().unwrap();
        for name in ["Mult", "PtCh", "mll", "Acoll", "MultChNL", "TMP/EtaPlus"] {
            assert!(ana.book().histo_by_name(name).is_some(), "missing {name}");
        }
        assert!(ana.book().profile_by_name("EtaSumEt").is_some());
        assert!(ana.book().scatter_by_name("RapidityChPMRatio").is_some());
    }

    #[test]
    fn opposite_charge_pair_is_accepted() {
        let mut ana = DileptonAnalysis::new();
        ana.init().unwrap();
        let ev = Event::new(vec![
            muon(40.0, 0.3, 1.0, pdg::MUON),
            muon(38.0, -0.2, 1.0 + std::f64::consts::PI, -pdg::MUON),
        ]);
        assert_eq!(ana.analyze(&ev).unwrap(), EventOutcome::Accepted);
        assert_eq!(ana.book().histo_by_name("mll").unwrap().entries, 1);
    }

    #[test]
    fn same_charge_pair_is_vetoed() {
        let mut ana = DileptonAnalysis::new();
        ana.init().unwrap();
        let ev = Event::new(vec![
            muon(40.0, 0.3, 1.0, pdg::MUON),
            muon(38.0, -0.2, 2.0, pdg::MUON),
        ]);
        assert_eq!(ana.analyze(&ev).unwrap(), EventOutcome::Vetoed);
        assert_eq!(ana.book().histo_by_name("mll").unwrap().entries, 0);
        // Inclusive fills still happened.
        assert_eq!(ana.book().histo_by_name("Mult").unwrap().entries, 1);
    }
}
