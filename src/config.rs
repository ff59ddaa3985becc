//! TOML configuration for the literature lookup.
//!
//! ```toml
//! [literature]
//! search_endpoint = "https://api.crossref.org/works"
//! resolver_base = "https://doi.org"
//! max_results = 5
//! mailto = "lab@example.org"
//!
//! [extraction]
//! context_radius = 100
//! max_token_distance = 8
//! ```

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Crossref never gets asked for more works than this.
pub const MAX_SEARCH_RESULTS: usize = 5;

/// Top-level settings. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub literature: LiteratureSettings,
    pub extraction: ExtractionSettings,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LiteratureSettings {
    /// Bibliographic search endpoint (Crossref `works`).
    pub search_endpoint: String,
    /// Base URL that a DOI is appended to for full-text retrieval.
    pub resolver_base: String,
    /// Number of works requested, at most [`MAX_SEARCH_RESULTS`].
    pub max_results: usize,
    /// Contact address for the Crossref polite pool.
    pub mailto: Option<String>,
}

impl Default for LiteratureSettings {
    fn default() -> Self {
        Self {
            search_endpoint: "https://api.crossref.org/works".into(),
            resolver_base: "https://doi.org".into(),
            max_results: MAX_SEARCH_RESULTS,
            mailto: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractionSettings {
    /// Characters taken on each side of a unit match.
    pub context_radius: usize,
    /// Largest accepted token distance between unit and keyword.
    pub max_token_distance: usize,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            context_radius: 100,
            max_token_distance: 8,
        }
    }
}

impl Settings {
    /// Parse and validate settings from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(text).context("parsing settings TOML")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Load from `path` when given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        let lit = &self.literature;
        if lit.max_results == 0 || lit.max_results > MAX_SEARCH_RESULTS {
            bail!(
                "literature.max_results must be between 1 and {MAX_SEARCH_RESULTS}, got {}",
                lit.max_results
            );
        }
        if lit.search_endpoint.trim().is_empty() {
            bail!("literature.search_endpoint must not be empty");
        }
        if lit.resolver_base.trim().is_empty() {
            bail!("literature.resolver_base must not be empty");
        }
        if self.extraction.context_radius == 0 {
            bail!("extraction.context_radius must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.literature.max_results, 5);
        assert_eq!(settings.extraction.max_token_distance, 8);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let settings = Settings::from_toml(
            r#"
            [literature]
            mailto = "lab@example.org"
            max_results = 3
            "#,
        )
        .unwrap();
        assert_eq!(settings.literature.mailto.as_deref(), Some("lab@example.org"));
        assert_eq!(settings.literature.max_results, 3);
        assert_eq!(settings.literature.resolver_base, "https://doi.org");
        assert_eq!(settings.extraction.context_radius, 100);
    }

    #[test]
    fn too_many_results_is_rejected() {
        assert!(Settings::from_toml("[literature]\nmax_results = 20\n").is_err());
        assert!(Settings::from_toml("[literature]\nmax_results = 0\n").is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[extraction]\nmax_token_distance = 4").unwrap();
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.extraction.max_token_distance, 4);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Settings::load(Path::new("/nonexistent/gapfinder.toml")).is_err());
        assert_eq!(Settings::load_or_default(None).unwrap(), Settings::default());
    }
}
