//! Explicit entry point for the numeric pipeline.
//!
//! Range selection is validated here, before anything is fitted, so both
//! front ends share the same boundary checks.

use crate::error::{AnalysisError, Result};
use crate::optics::model::{
    BandGapEstimate, FitDomain, LinearFitResult, OpticalQuantities, SpectralSeries, TaucSeries,
    TransitionType,
};
use crate::optics::{tauc, transform};

/// Parameters of a single Tauc analysis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TaucRequest {
    pub transition: TransitionType,
    /// Inclusive photon-energy interval (eV). `None` uses the full finite range.
    pub fit_range: Option<(f64, f64)>,
}

/// Everything computed for one spectrum.
#[derive(Debug, Clone)]
pub struct TaucReport {
    pub series: SpectralSeries,
    pub optics: OpticalQuantities,
    pub tauc: TaucSeries,
    pub domain: FitDomain,
    pub fit: LinearFitResult,
    pub band_gap: BandGapEstimate,
}

/// Transform the series, build the Tauc plot data and extrapolate the band gap.
pub fn analyze(series: SpectralSeries, request: &TaucRequest) -> Result<TaucReport> {
    let selected = request.fit_range.map(validate_range).transpose()?;

    let optics = transform::transform(&series);
    let tauc = tauc::tauc_series(&series, &optics, request.transition);

    let (x_min, x_max) = match selected {
        Some(range) => range,
        None => tauc.energy_bounds().ok_or_else(|| {
            AnalysisError::Validation("photon energy has no finite values".into())
        })?,
    };

    let domain = tauc::select_domain(&tauc, x_min, x_max);
    let fit = tauc::linear_fit(&domain)?;
    let band_gap = tauc::extrapolate_band_gap(&fit)?;

    log::info!(
        "{} transition, fit over [{x_min:.3}, {x_max:.3}] eV ({} points): band gap {band_gap}",
        request.transition,
        fit.points_used
    );

    Ok(TaucReport {
        series,
        optics,
        tauc,
        domain,
        fit,
        band_gap,
    })
}

fn validate_range((x_min, x_max): (f64, f64)) -> Result<(f64, f64)> {
    if !x_min.is_finite() || !x_max.is_finite() {
        return Err(AnalysisError::Validation(format!(
            "fit range [{x_min}, {x_max}] must be finite"
        )));
    }
    if x_min > x_max {
        return Err(AnalysisError::Validation(format!(
            "fit range is empty: minimum {x_min} eV exceeds maximum {x_max} eV"
        )));
    }
    Ok((x_min, x_max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics::model::AcquisitionMode;

    fn flat_series() -> SpectralSeries {
        SpectralSeries::new(vec![400.0, 500.0, 600.0], vec![0.2, 0.4, 0.6], AcquisitionMode::Reflectance)
            .unwrap()
    }

    #[test]
    fn reversed_range_is_a_validation_error() {
        let request = TaucRequest {
            transition: TransitionType::Direct,
            fit_range: Some((3.0, 2.0)),
        };
        assert!(matches!(
            analyze(flat_series(), &request),
            Err(AnalysisError::Validation(_))
        ));
    }

    #[test]
    fn nan_bound_is_a_validation_error() {
        let request = TaucRequest {
            transition: TransitionType::Indirect,
            fit_range: Some((f64::NAN, 2.0)),
        };
        assert!(matches!(
            analyze(flat_series(), &request),
            Err(AnalysisError::Validation(_))
        ));
    }

    #[test]
    fn range_is_checked_before_the_spectrum() {
        // 0 nm has no finite photon energy; the range error wins.
        let series = SpectralSeries::new(vec![0.0, 0.0], vec![0.2, 0.4], AcquisitionMode::Reflectance)
            .unwrap();
        let request = TaucRequest {
            transition: TransitionType::Direct,
            fit_range: Some((3.0, 2.0)),
        };
        match analyze(series, &request) {
            Err(AnalysisError::Validation(msg)) => assert!(msg.contains("fit range is empty"), "{msg}"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn range_without_samples_is_insufficient() {
        let request = TaucRequest {
            transition: TransitionType::Direct,
            fit_range: Some((10.0, 11.0)),
        };
        assert_eq!(
            analyze(flat_series(), &request).unwrap_err(),
            AnalysisError::InsufficientData { found: 0 }
        );
    }

    #[test]
    fn default_range_covers_all_samples() {
        let report = analyze(flat_series(), &TaucRequest::default()).unwrap();
        assert_eq!(report.domain.len(), 3);
        assert_eq!(report.tauc.len(), report.series.len());
    }
}
