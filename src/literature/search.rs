use serde::Deserialize;
use thiserror::Error;

use crate::config::{ExtractionSettings, LiteratureSettings, MAX_SEARCH_RESULTS};

use super::extract::BandGapExtractor;
use super::fetch::{FullText, FullTextFetcher};
use super::model::{ExtractionSource, LiteratureWork};
use super::transport::{HttpTransport, TransportError};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LiteratureError {
    #[error("material name must not be empty")]
    EmptyQuery,

    #[error("invalid search endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("search service answered with HTTP {status}")]
    Status { status: u16 },

    #[error("malformed search response: {0}")]
    Malformed(String),
}

// ---------------------------------------------------------------------------
// Crossref response schema (only the fields we read)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct WorksResponse {
    message: WorksMessage,
}

#[derive(Debug, Deserialize)]
struct WorksMessage {
    #[serde(default)]
    items: Vec<WorkItem>,
}

#[derive(Debug, Deserialize)]
struct WorkItem {
    #[serde(default)]
    title: Vec<String>,
    #[serde(rename = "abstract", default)]
    abstract_text: Option<String>,
    #[serde(rename = "DOI", default)]
    doi: Option<String>,
}

// ---------------------------------------------------------------------------
// Searcher
// ---------------------------------------------------------------------------

/// Queries the bibliographic service and mines each work for a band gap,
/// falling back to the DOI-resolved full text when the abstract has none.
pub struct LiteratureSearcher<'a, T: HttpTransport + ?Sized> {
    transport: &'a T,
    settings: LiteratureSettings,
    extractor: BandGapExtractor,
}

impl<'a, T: HttpTransport + ?Sized> LiteratureSearcher<'a, T> {
    pub fn new(transport: &'a T, settings: LiteratureSettings, extraction: &ExtractionSettings) -> Self {
        Self {
            transport,
            settings,
            extractor: BandGapExtractor::from_settings(extraction),
        }
    }

    /// Search for `material` and return works in relevance order.
    ///
    /// One search request is made, then at most one full-text request per work.
    pub fn search(&self, material: &str) -> Result<Vec<LiteratureWork>, LiteratureError> {
        let material = material.trim();
        if material.is_empty() {
            return Err(LiteratureError::EmptyQuery);
        }

        let url = self.search_url(material)?;
        log::info!("searching literature for '{material}'");
        let response = self.transport.get(&url)?;
        if response.status != 200 {
            return Err(LiteratureError::Status {
                status: response.status,
            });
        }
        let parsed: WorksResponse = serde_json::from_str(&response.body)
            .map_err(|e| LiteratureError::Malformed(e.to_string()))?;

        let works: Vec<LiteratureWork> = parsed
            .message
            .items
            .into_iter()
            .take(self.max_results())
            .map(|item| self.examine(item))
            .collect();

        log::info!(
            "{} works found, {} with a band-gap value",
            works.len(),
            works.iter().filter(|w| w.extracted_band_gap.is_some()).count()
        );
        Ok(works)
    }

    fn max_results(&self) -> usize {
        self.settings.max_results.clamp(1, MAX_SEARCH_RESULTS)
    }

    fn search_url(&self, material: &str) -> Result<String, LiteratureError> {
        let rows = self.max_results().to_string();
        let mut params = vec![("query", material), ("rows", rows.as_str())];
        if let Some(mailto) = self.settings.mailto.as_deref() {
            params.push(("mailto", mailto));
        }

        reqwest::Url::parse_with_params(&self.settings.search_endpoint, &params)
            .map(String::from)
            .map_err(|e| LiteratureError::InvalidEndpoint {
                endpoint: self.settings.search_endpoint.clone(),
                message: e.to_string(),
            })
    }

    fn examine(&self, item: WorkItem) -> LiteratureWork {
        let title = item.title.into_iter().next().unwrap_or_default();
        let resolvable_url = item.doi.as_deref().map(|doi| {
            format!("{}/{doi}", self.settings.resolver_base.trim_end_matches('/'))
        });

        let mut work = LiteratureWork {
            title,
            doi: item.doi,
            resolvable_url,
            extracted_band_gap: None,
            source: None,
            note: None,
        };

        if let Some(value) = item
            .abstract_text
            .as_deref()
            .and_then(|text| self.extractor.extract(text))
        {
            work.extracted_band_gap = Some(value);
            work.source = Some(ExtractionSource::Abstract);
            return work;
        }

        let Some(url) = work.resolvable_url.as_deref() else {
            return work;
        };
        match FullTextFetcher::new(self.transport).fetch(url) {
            FullText::Retrieved(text) => {
                work.extracted_band_gap = self.extractor.extract(&text);
                work.source = work.extracted_band_gap.map(|_| ExtractionSource::FullText);
            }
            FullText::Unavailable { reason } => work.note = Some(reason),
        }
        work
    }
}
