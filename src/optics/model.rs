use std::fmt;
use std::str::FromStr;

use crate::error::{AnalysisError, Result};

// ---------------------------------------------------------------------------
// Acquisition mode / transition type
// ---------------------------------------------------------------------------

/// What the measured signal column represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcquisitionMode {
    #[default]
    Reflectance,
    Transmittance,
}

impl AcquisitionMode {
    pub const ALL: [AcquisitionMode; 2] = [AcquisitionMode::Reflectance, AcquisitionMode::Transmittance];

    /// Column header used for the raw signal in exports and plots.
    pub fn label(self) -> &'static str {
        match self {
            AcquisitionMode::Reflectance => "Reflectance",
            AcquisitionMode::Transmittance => "Transmittance",
        }
    }
}

impl fmt::Display for AcquisitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AcquisitionMode {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reflectance" | "r" => Ok(AcquisitionMode::Reflectance),
            "transmittance" | "t" => Ok(AcquisitionMode::Transmittance),
            other => Err(AnalysisError::Validation(format!(
                "unknown acquisition mode '{other}'"
            ))),
        }
    }
}

/// Electronic transition type selecting the Tauc exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionType {
    /// n = 2
    #[default]
    Direct,
    /// n = 1/2
    Indirect,
}

impl TransitionType {
    pub const ALL: [TransitionType; 2] = [TransitionType::Direct, TransitionType::Indirect];
}

impl fmt::Display for TransitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionType::Direct => f.write_str("Direct"),
            TransitionType::Indirect => f.write_str("Indirect"),
        }
    }
}

impl FromStr for TransitionType {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(TransitionType::Direct),
            "indirect" => Ok(TransitionType::Indirect),
            other => Err(AnalysisError::Validation(format!(
                "unknown transition type '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// SpectralSeries – the raw measurement
// ---------------------------------------------------------------------------

/// A measured spectrum: wavelength axis (nm) and the raw signal.
///
/// No ordering is imposed on the wavelengths; every transform is element-wise.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralSeries {
    pub wavelength_nm: Vec<f64>,
    pub signal: Vec<f64>,
    pub mode: AcquisitionMode,
}

impl SpectralSeries {
    pub fn new(wavelength_nm: Vec<f64>, signal: Vec<f64>, mode: AcquisitionMode) -> Result<Self> {
        if wavelength_nm.is_empty() {
            return Err(AnalysisError::Validation("spectral series is empty".into()));
        }
        if wavelength_nm.len() != signal.len() {
            return Err(AnalysisError::Validation(format!(
                "wavelength has {} values but signal has {}",
                wavelength_nm.len(),
                signal.len()
            )));
        }
        Ok(Self {
            wavelength_nm,
            signal,
            mode,
        })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.wavelength_nm.len()
    }

    /// Whether the series has no samples.
    pub fn is_empty(&self) -> bool {
        self.wavelength_nm.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Derived quantities
// ---------------------------------------------------------------------------

/// Optical quantities aligned index-for-index with the originating series.
/// Entries may be NaN or infinite where the formula is undefined.
#[derive(Debug, Clone, PartialEq)]
pub struct OpticalQuantities {
    pub reflectance: Vec<f64>,
    pub transmittance: Vec<f64>,
    pub absorbance: Vec<f64>,
    /// Kubelka–Munk `alpha`.
    pub absorption_coefficient: Vec<f64>,
}

impl OpticalQuantities {
    pub fn len(&self) -> usize {
        self.absorption_coefficient.len()
    }

    pub fn is_empty(&self) -> bool {
        self.absorption_coefficient.is_empty()
    }

    /// The quantity matching the acquisition mode (what was measured).
    pub fn measured(&self, mode: AcquisitionMode) -> &[f64] {
        match mode {
            AcquisitionMode::Reflectance => &self.reflectance,
            AcquisitionMode::Transmittance => &self.transmittance,
        }
    }
}

/// Photon energy axis and Tauc ordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct TaucSeries {
    pub photon_energy_ev: Vec<f64>,
    pub tauc_value: Vec<f64>,
    pub transition: TransitionType,
}

impl TaucSeries {
    pub fn len(&self) -> usize {
        self.photon_energy_ev.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photon_energy_ev.is_empty()
    }

    /// Finite (min, max) of the photon-energy axis, ignoring NaN/Inf.
    pub fn energy_bounds(&self) -> Option<(f64, f64)> {
        self.photon_energy_ev
            .iter()
            .copied()
            .filter(|e| e.is_finite())
            .fold(None, |acc, e| match acc {
                None => Some((e, e)),
                Some((lo, hi)) => Some((lo.min(e), hi.max(e))),
            })
    }
}

/// Samples whose photon energy falls inside the selected interval,
/// in series order. Non-finite ordinates are kept here and skipped by the fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitDomain {
    pub x_min: f64,
    pub x_max: f64,
    pub photon_energy_ev: Vec<f64>,
    pub tauc_value: Vec<f64>,
}

impl FitDomain {
    pub fn len(&self) -> usize {
        self.photon_energy_ev.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photon_energy_ev.is_empty()
    }

    /// Points where both coordinates are finite.
    pub fn finite_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.photon_energy_ev
            .iter()
            .zip(&self.tauc_value)
            .map(|(&x, &y)| (x, y))
            .filter(|(x, y)| x.is_finite() && y.is_finite())
    }
}

/// Least-squares line `tauc = slope · E + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFitResult {
    pub slope: f64,
    pub intercept: f64,
    pub fit_domain: [f64; 2],
    /// Finite points that entered the fit.
    pub points_used: usize,
}

impl LinearFitResult {
    /// Evaluate the fitted line.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Where a band-gap number came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Computed,
    Literature,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandGapEstimate {
    pub value_ev: f64,
    pub provenance: Provenance,
}

impl fmt::Display for BandGapEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} eV", self.value_ev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_rejects_mismatched_lengths() {
        let err = SpectralSeries::new(vec![400.0, 500.0], vec![0.3], AcquisitionMode::Reflectance)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Validation(_)));
    }

    #[test]
    fn series_rejects_empty_input() {
        assert!(SpectralSeries::new(vec![], vec![], AcquisitionMode::Transmittance).is_err());
    }

    #[test]
    fn energy_bounds_skip_non_finite() {
        let tauc = TaucSeries {
            photon_energy_ev: vec![f64::NAN, 2.0, 3.5, f64::INFINITY, 1.5],
            tauc_value: vec![0.0; 5],
            transition: TransitionType::Direct,
        };
        assert_eq!(tauc.energy_bounds(), Some((1.5, 3.5)));
    }

    #[test]
    fn parse_mode_and_transition() {
        assert_eq!("Transmittance".parse::<AcquisitionMode>().unwrap(), AcquisitionMode::Transmittance);
        assert_eq!("indirect".parse::<TransitionType>().unwrap(), TransitionType::Indirect);
        assert!("absorbance".parse::<AcquisitionMode>().is_err());
    }

    #[test]
    fn command_line_spellings() {
        assert_eq!("t".parse::<AcquisitionMode>().unwrap(), AcquisitionMode::Transmittance);
        assert_eq!(" R ".parse::<AcquisitionMode>().unwrap(), AcquisitionMode::Reflectance);
        assert_eq!("DIRECT".parse::<TransitionType>().unwrap(), TransitionType::Direct);
        let err = "quadratic".parse::<TransitionType>().unwrap_err();
        assert_eq!(err.to_string(), "invalid input: unknown transition type 'quadratic'");
    }
}
