//! Finalize-time normalization and the forward/backward ratio scatters.

use approx::assert_relative_eq;
use dl_analysis::{run_sequential, Analysis, DileptonAnalysis};
use dl_core::{pdg, Event, Particle, Vec4};

fn muon(pt: f64, eta: f64, phi: f64, pid: i32) -> Particle {
    Particle::new(Vec4::from_pt_eta_phi_m(pt, eta, phi, 0.105), pid)
}

fn pion(pt: f64, eta: f64, phi: f64) -> Particle {
    Particle::new(Vec4::from_pt_eta_phi_m(pt, eta, phi, 0.14), pdg::PI_PLUS)
}

fn signal_event() -> Event {
    Event::new(vec![
        muon(45.0, 0.6, 4.0, pdg::MUON),
        muon(40.0, -0.4, 1.2, -pdg::MUON),
    ])
}

#[test]
fn absolute_histograms_scale_by_cross_section_over_sumw() {
    // Three events, one accepted: normfac = 6.0 / 3.0 = 2.0.
    let events = vec![
        signal_event(),
        Event::new(vec![pion(2.0, 1.0, 0.5)]),
        Event::new(vec![pion(3.0, -1.5, 2.5)]),
    ];
    let mut ana = DileptonAnalysis::new();
    let summary = run_sequential(&mut ana, &events, 6.0).unwrap();
    assert_eq!(summary.accepted, 1);
    assert_relative_eq!(summary.sum_of_weights, 3.0);

    let mll = ana.book().histo_by_name("mll").unwrap();
    assert_relative_eq!(mll.sumw.iter().sum::<f64>(), 2.0, max_relative = 1e-12);
    // sumw2 scales quadratically.
    assert_relative_eq!(mll.sumw2.iter().sum::<f64>(), 4.0, max_relative = 1e-12);
}

#[test]
fn weighted_runs_use_the_weight_sum() {
    let mut ev1 = signal_event();
    ev1.weight = 0.5;
    let mut ev2 = Event::new(vec![pion(2.0, 1.0, 0.5)]);
    ev2.weight = 1.5;
    let mut ana = DileptonAnalysis::new();
    run_sequential(&mut ana, &[ev1, ev2], 4.0).unwrap();

    // mll got one fill of weight 0.5, then scales by 4.0 / 2.0.
    let mll = ana.book().histo_by_name("mll").unwrap();
    assert_relative_eq!(mll.sumw.iter().sum::<f64>(), 1.0, max_relative = 1e-12);
}

#[test]
fn inclusive_histograms_normalize_to_unit_area() {
    let events = vec![
        signal_event(),
        Event::new(vec![pion(2.0, 1.0, 0.5), pion(5.0, -2.0, 3.0)]),
    ];
    let mut ana = DileptonAnalysis::new();
    run_sequential(&mut ana, &events, 10.0).unwrap();

    for name in [
        "Mult", "Eta", "Rapidity", "Pt", "E", "Phi", "MultCh", "EtaCh", "RapidityCh", "PtCh",
        "ECh", "PhiCh",
    ] {
        let h = ana.book().histo_by_name(name).unwrap();
        assert_relative_eq!(h.integral(), 1.0, max_relative = 1e-9);
    }
}

#[test]
fn ratio_scatter_points_equal_tmp_bin_ratios() {
    // Three forward pions at |η| ≈ 1.1, one backward: ratio 3 in that bin.
    let events = vec![
        Event::new(vec![
            pion(2.0, 1.1, 0.5),
            pion(3.0, 1.12, 1.5),
            pion(4.0, 1.08, 2.5),
            pion(2.5, -1.1, 3.5),
        ]),
    ];
    let mut ana = DileptonAnalysis::new();
    run_sequential(&mut ana, &events, 1.0).unwrap();

    let plus = ana.book().histo_by_name("TMP/EtaPlus").unwrap();
    let minus = ana.book().histo_by_name("TMP/EtaMinus").unwrap();
    let scatter = ana.book().scatter_by_name("EtaPMRatio").unwrap();
    for (i, point) in scatter.points.iter().enumerate() {
        let expected = if minus.sumw[i] == 0.0 { 0.0 } else { plus.sumw[i] / minus.sumw[i] };
        assert_relative_eq!(point.y, expected, max_relative = 1e-12);
    }
    let bin = plus.axis.index(1.1).unwrap();
    assert_relative_eq!(scatter.points[bin].y, 3.0, max_relative = 1e-12);

    // Charged and rapidity variants are built from their own temporaries.
    for name in ["EtaChPMRatio", "RapidityPMRatio", "RapidityChPMRatio"] {
        assert_eq!(ana.book().scatter_by_name(name).unwrap().points.len(), 25);
    }
}

#[test]
fn tmp_histograms_stay_out_of_artifacts() {
    let mut ana = DileptonAnalysis::new();
    run_sequential(&mut ana, &[signal_event()], 1.0).unwrap();
    let artifact = ana.book().to_artifact();
    assert!(artifact.histograms.iter().all(|h| !h.name.starts_with("TMP/")));
    assert!(artifact.histograms.iter().any(|h| h.name == "mll"));
    assert_eq!(artifact.profiles.len(), 1);
    assert_eq!(artifact.scatters.len(), 4);
}
