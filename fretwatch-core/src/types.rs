use std::path::PathBuf;

use crate::error::ConfigError;

/// A candidate for-sale post scraped from a forum. The normalized URL is
/// the listing's identity; the title is only for matching and display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub title: String,
    pub url: String,
}

impl Listing {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// A search term matched against a listing title, paired with the listing
/// it matched. Produced by the matcher, consumed by the notify step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEvent {
    pub term: String,
    pub listing: Listing,
}

#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub search_terms: Vec<String>,
    pub store_path: PathBuf,
    pub icon_path: Option<PathBuf>,
}

/// Splits the operator-supplied comma-delimited term string. Terms are
/// trimmed; an input with no usable terms is a usage error.
pub fn parse_search_terms(raw: &str) -> Result<Vec<String>, ConfigError> {
    let terms: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(String::from)
        .collect();

    if terms.is_empty() {
        return Err(ConfigError::NoSearchTerms);
    }
    Ok(terms)
}
