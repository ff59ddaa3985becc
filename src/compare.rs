use crate::error::{AnalysisError, Result};

/// Absolute tolerance (eV) for agreement with a literature value.
pub const BAND_GAP_TOLERANCE_EV: f64 = 0.1;

/// Outcome of checking a computed band gap against a literature value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub computed_ev: f64,
    pub literature_ev: f64,
    pub difference_ev: f64,
    pub within_tolerance: bool,
}

/// Parse the leading whitespace-separated token of a literature string
/// (e.g. `"2.5 eV"`) as a number.
pub fn parse_literature_value(literature: &str) -> Result<f64> {
    let token = literature
        .split_whitespace()
        .next()
        .ok_or_else(|| AnalysisError::ValueParse(literature.to_string()))?;
    token
        .parse::<f64>()
        .map_err(|_| AnalysisError::ValueParse(token.to_string()))
}

pub fn compare(computed_ev: f64, literature: &str) -> Result<Comparison> {
    let literature_ev = parse_literature_value(literature)?;
    let difference_ev = (computed_ev - literature_ev).abs();
    Ok(Comparison {
        computed_ev,
        literature_ev,
        difference_ev,
        within_tolerance: difference_ev <= BAND_GAP_TOLERANCE_EV,
    })
}

/// Whether `computed_ev` agrees with the literature value within 0.1 eV.
pub fn compare_band_gap(computed_ev: f64, literature: &str) -> Result<bool> {
    compare(computed_ev, literature).map(|c| c.within_tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn close_values_agree() {
        assert!(compare_band_gap(2.45, "2.5 eV").unwrap());
        assert!(compare_band_gap(2.55, "2.5").unwrap());
    }

    #[test]
    fn distant_values_disagree() {
        assert!(!compare_band_gap(2.0, "2.5 eV").unwrap());
    }

    #[test]
    fn comparison_reports_difference() {
        let c = compare(3.0, "  3.2 eV (direct)").unwrap();
        assert_relative_eq!(c.literature_ev, 3.2);
        assert_relative_eq!(c.difference_ev, 0.2, epsilon = 1e-12);
        assert!(!c.within_tolerance);
    }

    #[test]
    fn non_numeric_leading_token_is_a_parse_error() {
        assert_eq!(
            compare_band_gap(2.0, "about 2.5 eV").unwrap_err(),
            AnalysisError::ValueParse("about".into())
        );
        assert!(matches!(compare_band_gap(2.0, "   "), Err(AnalysisError::ValueParse(_))));
    }
}
