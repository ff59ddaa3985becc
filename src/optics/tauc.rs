use crate::error::{AnalysisError, Result};

use super::model::{
    BandGapEstimate, FitDomain, LinearFitResult, OpticalQuantities, Provenance, SpectralSeries,
    TaucSeries, TransitionType,
};

/// Planck's constant in eV·s.
pub const PLANCK_EV_S: f64 = 4.135667696e-15;
/// Speed of light in m/s (rounded value, kept for reproducibility of results).
pub const SPEED_OF_LIGHT_M_S: f64 = 3e8;

// ---------------------------------------------------------------------------
// Axis conversion and ordinate
// ---------------------------------------------------------------------------

/// Photon energy (eV) of light with the given wavelength (nm).
pub fn photon_energy(wavelength_nm: f64) -> f64 {
    (PLANCK_EV_S * SPEED_OF_LIGHT_M_S) / (wavelength_nm * 1e-9)
}

/// Tauc ordinate `(alpha·hν)^n`. The indirect root is NaN for negative products.
pub fn tauc_ordinate(alpha: f64, photon_energy_ev: f64, transition: TransitionType) -> f64 {
    let product = alpha * photon_energy_ev;
    match transition {
        TransitionType::Direct => product.powi(2),
        TransitionType::Indirect => product.sqrt(),
    }
}

/// Build the Tauc series for a spectrum and its derived alpha values.
pub fn tauc_series(
    series: &SpectralSeries,
    optics: &OpticalQuantities,
    transition: TransitionType,
) -> TaucSeries {
    let photon_energy_ev: Vec<f64> = series.wavelength_nm.iter().map(|&w| photon_energy(w)).collect();
    let tauc_value = photon_energy_ev
        .iter()
        .zip(&optics.absorption_coefficient)
        .map(|(&e, &a)| tauc_ordinate(a, e, transition))
        .collect();

    TaucSeries {
        photon_energy_ev,
        tauc_value,
        transition,
    }
}

// ---------------------------------------------------------------------------
// Linear region and extrapolation
// ---------------------------------------------------------------------------

/// Select every sample with `x_min ≤ photon_energy ≤ x_max`.
pub fn select_domain(tauc: &TaucSeries, x_min: f64, x_max: f64) -> FitDomain {
    let (photon_energy_ev, tauc_value) = tauc
        .photon_energy_ev
        .iter()
        .zip(&tauc.tauc_value)
        .filter(|&(&e, _)| e >= x_min && e <= x_max)
        .map(|(&e, &y)| (e, y))
        .unzip();

    FitDomain {
        x_min,
        x_max,
        photon_energy_ev,
        tauc_value,
    }
}

/// Ordinary least squares over the finite points of the domain.
pub fn linear_fit(domain: &FitDomain) -> Result<LinearFitResult> {
    let points: Vec<(f64, f64)> = domain.finite_points().collect();
    let n = points.len();
    if n < 2 {
        return Err(AnalysisError::InsufficientData { found: n });
    }

    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n as f64;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n as f64;

    let (sxx, sxy) = points.iter().fold((0.0, 0.0), |(sxx, sxy), (x, y)| {
        let dx = x - mean_x;
        (sxx + dx * dx, sxy + dx * (y - mean_y))
    });

    // All x identical: the slope is undefined.
    if sxx == 0.0 {
        return Err(AnalysisError::InsufficientData { found: 1 });
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    Ok(LinearFitResult {
        slope,
        intercept,
        fit_domain: [domain.x_min, domain.x_max],
        points_used: n,
    })
}

/// X-intercept of the fitted line, `−intercept / slope`.
pub fn extrapolate_band_gap(fit: &LinearFitResult) -> Result<BandGapEstimate> {
    if fit.slope == 0.0 {
        return Err(AnalysisError::DivisionByZero);
    }
    Ok(BandGapEstimate {
        value_ev: -fit.intercept / fit.slope,
        provenance: Provenance::Computed,
    })
}
