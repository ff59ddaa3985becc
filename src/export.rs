//! CSV / TXT export of a finished analysis.
//!
//! Fixed columns: wavelength, measured signal, absorbance, photon energy,
//! Tauc value, fit-domain photon energy and Tauc value, band gap. The
//! fit-domain columns are shorter than the series and are left empty
//! past their end; the band gap repeats on every row.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::pipeline::TaucReport;

/// One export row in column order; `None` marks an empty fitted cell.
struct Row {
    wavelength: f64,
    measured: f64,
    absorbance: f64,
    photon_energy: f64,
    tauc: f64,
    fitted_energy: Option<f64>,
    fitted_tauc: Option<f64>,
    band_gap: f64,
}

pub fn header(report: &TaucReport) -> [&'static str; 8] {
    [
        "Wavelength (nm)",
        report.series.mode.label(),
        "Absorbance",
        "Photon Energy (eV)",
        "Tauc Plot Value",
        "Fitted Photon Energy (eV)",
        "Fitted Tauc Plot Value",
        "Band Gap (eV)",
    ]
}

fn rows(report: &TaucReport) -> impl Iterator<Item = Row> + '_ {
    let measured = report.optics.measured(report.series.mode);
    (0..report.tauc.len()).map(move |i| Row {
        wavelength: report.series.wavelength_nm[i],
        measured: measured[i],
        absorbance: report.optics.absorbance[i],
        photon_energy: report.tauc.photon_energy_ev[i],
        tauc: report.tauc.tauc_value[i],
        fitted_energy: report.domain.photon_energy_ev.get(i).copied(),
        fitted_tauc: report.domain.tauc_value.get(i).copied(),
        band_gap: report.band_gap.value_ev,
    })
}

/// Format like the analysis tables elsewhere: `400.0`, `0.25`, `nan`, `inf`.
fn format_number(v: f64) -> String {
    if v.is_nan() {
        "nan".into()
    } else if v.is_infinite() {
        if v > 0.0 { "inf".into() } else { "-inf".into() }
    } else if v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

/// CSV cells: NaN is written as an empty cell.
fn csv_cell(v: f64) -> String {
    if v.is_nan() { String::new() } else { format_number(v) }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

pub fn write_csv<W: Write>(report: &TaucReport, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(header(report)).context("writing CSV header")?;

    for row in rows(report) {
        let optional = |v: Option<f64>| v.map(csv_cell).unwrap_or_default();
        writer
            .write_record([
                csv_cell(row.wavelength),
                csv_cell(row.measured),
                csv_cell(row.absorbance),
                csv_cell(row.photon_energy),
                csv_cell(row.tauc),
                optional(row.fitted_energy),
                optional(row.fitted_tauc),
                csv_cell(row.band_gap),
            ])
            .context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

pub fn to_csv_string(report: &TaucReport) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(report, &mut buffer)?;
    String::from_utf8(buffer).context("CSV output is not UTF-8")
}

// ---------------------------------------------------------------------------
// TXT
// ---------------------------------------------------------------------------

pub fn write_txt<W: Write>(report: &TaucReport, mut out: W) -> Result<()> {
    writeln!(out, "{}", header(report).join(","))?;
    for row in rows(report) {
        let optional = |v: Option<f64>| v.map(format_number).unwrap_or_default();
        writeln!(
            out,
            "{},{},{},{},{},{},{},{}",
            format_number(row.wavelength),
            format_number(row.measured),
            format_number(row.absorbance),
            format_number(row.photon_energy),
            format_number(row.tauc),
            optional(row.fitted_energy),
            optional(row.fitted_tauc),
            format_number(row.band_gap),
        )?;
    }
    out.flush()?;
    Ok(())
}

pub fn to_txt_string(report: &TaucReport) -> Result<String> {
    let mut buffer = Vec::new();
    write_txt(report, &mut buffer)?;
    String::from_utf8(buffer).context("TXT output is not UTF-8")
}

/// Write to `path`, choosing CSV or TXT from the extension (CSV by default).
pub fn export_to_path(report: &TaucReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let out = std::io::BufWriter::new(file);

    let is_txt = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"));
    let written = if is_txt {
        write_txt(report, out)
    } else {
        write_csv(report, out)
    };
    written.with_context(|| format!("exporting to {}", path.display()))?;

    log::info!("Exported {} rows to {}", report.tauc.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(400.0), "400.0");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(f64::NAN), "nan");
        assert_eq!(format_number(f64::NEG_INFINITY), "-inf");
        assert_eq!(csv_cell(f64::NAN), "");
    }
}
