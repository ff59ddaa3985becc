use std::fmt;

use crate::optics::model::{BandGapEstimate, Provenance};

/// Which text of a work yielded its band-gap value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionSource {
    Abstract,
    FullText,
}

impl fmt::Display for ExtractionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionSource::Abstract => f.write_str("abstract"),
            ExtractionSource::FullText => f.write_str("full text"),
        }
    }
}

/// A candidate work returned by the bibliographic search.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteratureWork {
    pub title: String,
    pub doi: Option<String>,
    /// DOI resolver URL, when the work has a DOI.
    pub resolvable_url: Option<String>,
    pub extracted_band_gap: Option<f64>,
    pub source: Option<ExtractionSource>,
    /// Why the full text could not be read, if that was attempted and failed.
    pub note: Option<String>,
}

impl LiteratureWork {
    pub fn estimate(&self) -> Option<BandGapEstimate> {
        self.extracted_band_gap.map(|value_ev| BandGapEstimate {
            value_ev,
            provenance: Provenance::Literature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work(value: Option<f64>) -> LiteratureWork {
        LiteratureWork {
            title: "Anatase films".into(),
            doi: Some("10.1/x".into()),
            resolvable_url: Some("https://doi.org/10.1/x".into()),
            extracted_band_gap: value,
            source: value.map(|_| ExtractionSource::Abstract),
            note: None,
        }
    }

    #[test]
    fn extracted_value_displays_as_literature_estimate() {
        let estimate = work(Some(3.2)).estimate().unwrap();
        assert_eq!(estimate.provenance, Provenance::Literature);
        assert_eq!(format!("{estimate} ({})", ExtractionSource::Abstract), "3.20 eV (abstract)");
    }

    #[test]
    fn no_value_no_estimate() {
        assert!(work(None).estimate().is_none());
    }
}
