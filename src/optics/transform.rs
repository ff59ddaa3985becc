use super::model::{AcquisitionMode, OpticalQuantities, SpectralSeries};

// ---------------------------------------------------------------------------
// Kubelka–Munk
// ---------------------------------------------------------------------------

/// Kubelka–Munk function `(1 − R)² / (2R)`.
///
/// `R = 0` yields `+inf`; negative `R` yields a negative value. Neither panics.
pub fn kubelka_munk(reflectance: f64) -> f64 {
    (1.0 - reflectance).powi(2) / (2.0 * reflectance)
}

/// Absorbance from a Kubelka–Munk value: `1 − √(1 + 4·alpha) / 2`.
///
/// Note: this is not the algebraic inverse of [`kubelka_munk`]; it is kept
/// as the established formula for reflectance-mode absorbance.
pub fn inverse_kubelka_munk(alpha: f64) -> f64 {
    1.0 - (1.0 + 4.0 * alpha).sqrt() / 2.0
}

// ---------------------------------------------------------------------------
// Series transform
// ---------------------------------------------------------------------------

/// Derive reflectance, transmittance, absorbance and alpha from a raw series.
///
/// In transmittance mode the whole series is treated as a percentage when
/// any value exceeds 1.
pub fn transform(series: &SpectralSeries) -> OpticalQuantities {
    match series.mode {
        AcquisitionMode::Reflectance => from_reflectance(&series.signal),
        AcquisitionMode::Transmittance => from_transmittance(&series.signal),
    }
}

fn from_reflectance(signal: &[f64]) -> OpticalQuantities {
    let reflectance = signal.to_vec();
    let absorption_coefficient: Vec<f64> = reflectance.iter().map(|&r| kubelka_munk(r)).collect();
    let absorbance = absorption_coefficient
        .iter()
        .map(|&a| inverse_kubelka_munk(a))
        .collect();
    let transmittance = reflectance.iter().map(|&r| 1.0 - r).collect();

    OpticalQuantities {
        reflectance,
        transmittance,
        absorbance,
        absorption_coefficient,
    }
}

fn from_transmittance(signal: &[f64]) -> OpticalQuantities {
    let is_percent = signal.iter().any(|&t| t > 1.0);
    if is_percent {
        log::debug!("transmittance exceeds 1, treating series as percentage");
    }
    let transmittance: Vec<f64> = if is_percent {
        signal.iter().map(|&t| t / 100.0).collect()
    } else {
        signal.to_vec()
    };

    // log10 of a non-positive value is NaN (or -inf at 0), as intended.
    let absorbance = transmittance.iter().map(|&t| -t.log10()).collect();
    let reflectance: Vec<f64> = transmittance.iter().map(|&t| 1.0 - t).collect();
    let absorption_coefficient = reflectance.iter().map(|&r| kubelka_munk(r)).collect();

    OpticalQuantities {
        reflectance,
        transmittance,
        absorbance,
        absorption_coefficient,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn series(signal: Vec<f64>, mode: AcquisitionMode) -> SpectralSeries {
        let wavelengths = (0..signal.len()).map(|i| 400.0 + i as f64 * 10.0).collect();
        SpectralSeries::new(wavelengths, signal, mode).unwrap()
    }

    #[test]
    fn kubelka_munk_is_positive_on_open_unit_interval() {
        for i in 1..100 {
            let r = i as f64 / 100.0;
            assert!(kubelka_munk(r) > 0.0, "R = {r}");
        }
    }

    #[test]
    fn kubelka_munk_at_zero_is_not_finite() {
        assert!(!kubelka_munk(0.0).is_finite());
    }

    #[test]
    fn reflectance_mode_values() {
        let q = transform(&series(vec![0.5, 0.0], AcquisitionMode::Reflectance));
        assert_relative_eq!(q.absorption_coefficient[0], 0.25);
        assert_relative_eq!(q.absorbance[0], 1.0 - 2.0_f64.sqrt() / 2.0);
        assert_relative_eq!(q.transmittance[0], 0.5);
        assert!(q.absorption_coefficient[1].is_infinite());
        assert!(!q.absorbance[1].is_finite());
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn transmittance_percentage_is_rescaled() {
        let q = transform(&series(vec![50.0, 10.0], AcquisitionMode::Transmittance));
        assert_relative_eq!(q.transmittance[0], 0.5);
        assert_relative_eq!(q.transmittance[1], 0.1);
        assert_relative_eq!(q.absorbance[1], 1.0);
        assert_relative_eq!(q.reflectance[0], 0.5);
        assert_relative_eq!(q.absorption_coefficient[0], 0.25);
    }

    #[test]
    fn transmittance_fraction_is_left_alone() {
        let q = transform(&series(vec![0.5, 1.0], AcquisitionMode::Transmittance));
        assert_relative_eq!(q.transmittance[1], 1.0);
        assert_relative_eq!(q.absorbance[1], 0.0);
        // reflectance 0 → alpha infinite
        assert!(q.absorption_coefficient[1].is_infinite());
    }

    #[test]
    fn non_positive_transmittance_propagates_nan() {
        let q = transform(&series(vec![-0.2, 0.3], AcquisitionMode::Transmittance));
        assert!(q.absorbance[0].is_nan());
        assert!(q.absorbance[1].is_finite());
    }
}
