use std::sync::LazyLock;

use regex::Regex;

use crate::config::ExtractionSettings;

/// A number followed by an electron-volt unit, in any letter case.
static UNIT_MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(eV|electron volts|ev|e\.v\.|e\.v)")
        .expect("unit mention pattern is valid")
});

/// Words of a lower-cased window: numbers, or letter runs that may carry
/// inner dots and hyphens (`e.v.`, `band-gap`).
static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]+(?:\.[0-9]+)?|[a-z][a-z.\-]*").expect("word pattern is valid")
});

const KEYWORD_PHRASES: [&str; 3] = ["band gap", "bandgap", "band-gap"];
const KEYWORD_TOKENS: [&str; 4] = ["band", "gap", "bandgap", "band-gap"];

/// One unit mention and the verdict on it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch {
    pub value: f64,
    /// Byte offset of the number in the scanned text.
    pub text_position: usize,
    /// Lower-cased characters around the match.
    pub context_window: String,
    pub accepted: bool,
}

/// Finds band-gap values in free text with a keyword-proximity heuristic.
///
/// A value is accepted when its context window mentions a band gap and the
/// unit token lies within `max_token_distance` words of a band/gap keyword.
/// The unit token is located by its first occurrence in the window, so a
/// unit word repeated earlier in the window shifts the measured distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandGapExtractor {
    pub context_radius: usize,
    pub max_token_distance: usize,
}

impl Default for BandGapExtractor {
    fn default() -> Self {
        Self::from_settings(&ExtractionSettings::default())
    }
}

impl BandGapExtractor {
    pub fn from_settings(settings: &ExtractionSettings) -> Self {
        Self {
            context_radius: settings.context_radius,
            max_token_distance: settings.max_token_distance,
        }
    }

    /// First accepted value in document order.
    pub fn extract(&self, text: &str) -> Option<f64> {
        self.matches(text).find(|m| m.accepted).map(|m| m.value)
    }

    /// Every unit mention in document order, accepted or not.
    pub fn matches<'t>(&'t self, text: &'t str) -> impl Iterator<Item = ExtractionMatch> + 't {
        UNIT_MENTION.captures_iter(text).filter_map(move |caps| {
            let whole = caps.get(0)?;
            // "ev" at the start of "every" is not a unit.
            if text[whole.end()..].chars().next().is_some_and(char::is_alphabetic) {
                return None;
            }
            let value: f64 = caps.get(1)?.as_str().parse().ok()?;
            let unit = caps.get(2)?.as_str();

            let context_window = window(text, whole.start(), self.context_radius).to_lowercase();
            let accepted = self.judge(&context_window, unit);
            log::debug!(
                "{value} {unit} at byte {}: {}",
                whole.start(),
                if accepted { "accepted" } else { "rejected" }
            );

            Some(ExtractionMatch {
                value,
                text_position: whole.start(),
                context_window,
                accepted,
            })
        })
    }

    fn judge(&self, context_window: &str, unit: &str) -> bool {
        if !KEYWORD_PHRASES.iter().any(|p| context_window.contains(p)) {
            return false;
        }

        let tokens: Vec<&str> = WORD
            .find_iter(context_window)
            .map(|m| normalize(m.as_str()))
            .collect();

        // Multi-word units ("electron volts") are located by their first word.
        let unit_lower = unit.to_lowercase();
        let unit_token = normalize(unit_lower.split_whitespace().next().unwrap_or(""));
        let Some(unit_index) = tokens.iter().position(|t| *t == unit_token) else {
            return false;
        };

        tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| KEYWORD_TOKENS.contains(*t))
            .map(|(i, _)| i.abs_diff(unit_index))
            .min()
            .is_some_and(|distance| distance <= self.max_token_distance)
    }
}

/// Shorthand for [`BandGapExtractor::extract`] with default settings.
pub fn extract_band_gap(text: &str) -> Option<f64> {
    BandGapExtractor::default().extract(text)
}

/// Up to `radius` characters before and after byte offset `start`.
fn window(text: &str, start: usize, radius: usize) -> &str {
    let lo = match radius.checked_sub(1) {
        Some(back) => text[..start]
            .char_indices()
            .rev()
            .nth(back)
            .map_or(0, |(i, _)| i),
        None => start,
    };
    let hi = text[start..]
        .char_indices()
        .nth(radius)
        .map_or(text.len(), |(i, _)| start + i);
    &text[lo..hi]
}

/// Sentence-final dots are not part of a word.
fn normalize(token: &str) -> &str {
    token.trim_end_matches('.')
}
