//! End-to-end: synthetic spectra with a known band gap through the pipeline and export.

use approx::assert_relative_eq;
use gapfinder::export;
use gapfinder::optics::tauc::photon_energy;
use gapfinder::optics::{AcquisitionMode, Provenance, SpectralSeries, TransitionType};
use gapfinder::pipeline::{TaucRequest, analyze};

const GAP_EV: f64 = 2.0;

/// Reflectance whose Kubelka–Munk alpha gives `(alpha·E)² = 10·(E − Eg)` above the gap.
fn direct_gap_reflectance(wavelengths: &[f64]) -> Vec<f64> {
    wavelengths
        .iter()
        .map(|&w| {
            let e = photon_energy(w);
            let alpha = if e > GAP_EV { (10.0 * (e - GAP_EV)).sqrt() / e } else { 0.0 };
            1.0 + alpha - (alpha * alpha + 2.0 * alpha).sqrt()
        })
        .collect()
}

fn wavelengths() -> Vec<f64> {
    (0..=250).map(|i| 350.0 + i as f64 * 2.0).collect()
}

fn request() -> TaucRequest {
    TaucRequest {
        transition: TransitionType::Direct,
        fit_range: Some((2.2, 3.0)),
    }
}

#[test]
fn reflectance_spectrum_recovers_direct_gap() {
    let wl = wavelengths();
    let series = SpectralSeries::new(wl.clone(), direct_gap_reflectance(&wl), AcquisitionMode::Reflectance)
        .unwrap();

    let report = analyze(series, &request()).unwrap();
    assert_relative_eq!(report.band_gap.value_ev, GAP_EV, epsilon = 1e-6);
    assert_relative_eq!(report.fit.slope, 10.0, epsilon = 1e-6);
    assert_eq!(report.band_gap.provenance, Provenance::Computed);
    assert_eq!(report.fit.fit_domain, [2.2, 3.0]);
    assert!(report.domain.photon_energy_ev.iter().all(|&e| (2.2..=3.0).contains(&e)));
}

#[test]
fn percent_transmittance_recovers_the_same_gap() {
    let wl = wavelengths();
    let percent: Vec<f64> = direct_gap_reflectance(&wl)
        .into_iter()
        .map(|r| (1.0 - r) * 100.0)
        .collect();
    let series = SpectralSeries::new(wl, percent, AcquisitionMode::Transmittance).unwrap();

    let report = analyze(series, &request()).unwrap();
    assert_relative_eq!(report.band_gap.value_ev, GAP_EV, epsilon = 1e-6);
    assert!(report.optics.transmittance.iter().all(|&t| t <= 1.0));
}

#[test]
fn zero_reflectance_does_not_abort_the_analysis() {
    let wl = wavelengths();
    let mut r = direct_gap_reflectance(&wl);
    r[0] = 0.0;
    let series = SpectralSeries::new(wl, r, AcquisitionMode::Reflectance).unwrap();

    let report = analyze(series, &request()).unwrap();
    assert!(report.optics.absorption_coefficient[0].is_infinite());
    assert_relative_eq!(report.band_gap.value_ev, GAP_EV, epsilon = 1e-6);
}

#[test]
fn csv_export_has_one_row_per_sample() {
    let wl = wavelengths();
    let n = wl.len();
    let series = SpectralSeries::new(wl.clone(), direct_gap_reflectance(&wl), AcquisitionMode::Reflectance)
        .unwrap();
    let report = analyze(series, &request()).unwrap();
    let fitted = report.domain.len();
    assert!(fitted > 1 && fitted < n);

    let csv_text = export::to_csv_string(&report).unwrap();
    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(
        headers,
        vec![
            "Wavelength (nm)",
            "Reflectance",
            "Absorbance",
            "Photon Energy (eV)",
            "Tauc Plot Value",
            "Fitted Photon Energy (eV)",
            "Fitted Tauc Plot Value",
            "Band Gap (eV)",
        ]
    );

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), n);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record[5].is_empty(), i >= fitted, "row {i}");
        assert_eq!(record[6].is_empty(), i >= fitted, "row {i}");
        let gap: f64 = record[7].parse().unwrap();
        assert_relative_eq!(gap, report.band_gap.value_ev);
    }
}

#[test]
fn txt_export_names_transmittance_column() {
    let series = SpectralSeries::new(
        vec![400.0, 500.0, 600.0, 700.0],
        vec![0.2, 0.4, 0.6, 0.8],
        AcquisitionMode::Transmittance,
    )
    .unwrap();
    let report = analyze(
        series,
        &TaucRequest {
            transition: TransitionType::Indirect,
            fit_range: Some((1.9, 2.6)),
        },
    )
    .unwrap();
    assert_eq!(report.domain.len(), 2);

    let txt = export::to_txt_string(&report).unwrap();
    let lines: Vec<&str> = txt.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("Wavelength (nm),Transmittance,Absorbance,"));
    assert!(lines[1].starts_with("400.0,0.2,"));
    let last: Vec<&str> = lines[4].split(',').collect();
    assert_eq!(last.len(), 8);
    assert_eq!(last[5], "");
    assert_eq!(last[6], "");
}

#[test]
fn export_to_path_picks_format_from_extension() {
    let dir = tempfile::tempdir().unwrap();
    let wl = wavelengths();
    let series = SpectralSeries::new(wl.clone(), direct_gap_reflectance(&wl), AcquisitionMode::Reflectance)
        .unwrap();
    let report = analyze(series, &request()).unwrap();

    let csv_path = dir.path().join("out/band_gap_results.csv");
    let txt_path = dir.path().join("band_gap_results.txt");
    export::export_to_path(&report, &csv_path).unwrap();
    export::export_to_path(&report, &txt_path).unwrap();

    let txt = std::fs::read_to_string(&txt_path).unwrap();
    assert_eq!(txt.lines().count(), wl.len() + 1);
    assert!(std::fs::metadata(&csv_path).unwrap().len() > 0);
}

#[test]
fn non_finite_samples_inside_the_fit_range_are_exported() {
    let wl = wavelengths();
    let mut r = direct_gap_reflectance(&wl);
    // 500 nm and 520 nm both lie inside [2.2, 3.0] eV.
    let missing = wl.iter().position(|&w| w == 500.0).unwrap();
    let zero = wl.iter().position(|&w| w == 520.0).unwrap();
    r[missing] = f64::NAN;
    r[zero] = 0.0;
    let series = SpectralSeries::new(wl, r, AcquisitionMode::Reflectance).unwrap();

    let report = analyze(series, &request()).unwrap();
    assert_relative_eq!(report.band_gap.value_ev, GAP_EV, epsilon = 1e-6);
    let nan_slot = report.domain.tauc_value.iter().position(|v| v.is_nan()).unwrap();
    let inf_slot = report.domain.tauc_value.iter().position(|v| v.is_infinite()).unwrap();

    let csv_text = export::to_csv_string(&report).unwrap();
    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(&records[missing][1], "");
    assert_eq!(&records[missing][4], "");
    assert!(!records[nan_slot][5].is_empty());
    assert_eq!(&records[nan_slot][6], "");
    assert_eq!(&records[zero][2], "-inf");
    assert_eq!(&records[inf_slot][6], "inf");

    let txt = export::to_txt_string(&report).unwrap();
    let lines: Vec<Vec<&str>> = txt.lines().skip(1).map(|l| l.split(',').collect()).collect();
    assert_eq!(lines[missing][1], "nan");
    assert_eq!(lines[missing][4], "nan");
    assert_eq!(lines[nan_slot][6], "nan");
    assert_eq!(lines[zero][2], "-inf");
    assert_eq!(lines[inf_slot][6], "inf");
}
