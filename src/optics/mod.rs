/// Optics layer: spectral types, optical transforms and Tauc analysis.
///
/// Architecture:
/// ```text
///   SpectralSeries (λ, signal, mode)
///        │
///        ▼
///   ┌───────────┐
///   │ transform  │  reflectance / transmittance → alpha, absorbance
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │   tauc     │  λ → hν, (alpha·hν)^n, linear fit, x-intercept
///   └───────────┘
///        │
///        ▼
///   BandGapEstimate
/// ```

pub mod model;
pub mod tauc;
pub mod transform;

pub use model::{
    AcquisitionMode, BandGapEstimate, FitDomain, LinearFitResult, OpticalQuantities, Provenance,
    SpectralSeries, TaucSeries, TransitionType,
};
