use thiserror::Error;

/// Failures of the numeric pipeline and its input boundary.
///
/// Non-finite values produced by the optical transforms are not errors;
/// they travel through the pipeline as NaN/Inf.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("linear fit needs at least 2 finite points with distinct photon energies, found {found}")]
    InsufficientData { found: usize },

    #[error("fitted slope is zero, band gap cannot be extrapolated")]
    DivisionByZero,

    #[error("cannot parse a numeric value from '{0}'")]
    ValueParse(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
