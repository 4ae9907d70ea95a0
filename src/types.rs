//! Core types for aggregated search results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder URL used when a result has no real link.
pub const PLACEHOLDER_URL: &str = "#";

/// Origin of a search result.
///
/// The two live sources are [`Source::DuckDuckGo`] and [`Source::Wikipedia`];
/// the remaining variants are only ever attached to synthetic filler results
/// produced when the live sources return too little.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    /// DuckDuckGo instant-answer API.
    DuckDuckGo,
    /// Wikipedia page-summary API.
    Wikipedia,
    /// Filler origin.
    Google,
    /// Filler origin.
    Bing,
    /// Filler origin.
    Yahoo,
    /// Filler origin.
    Baidu,
}

impl Source {
    /// Human-readable name, also the grouping key used by the synthesizer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => "DuckDuckGo",
            Self::Wikipedia => "Wikipedia",
            Self::Google => "Google",
            Self::Bing => "Bing",
            Self::Yahoo => "Yahoo",
            Self::Baidu => "Baidu",
        }
    }

    /// The four origins cycled through by the filler generator.
    pub fn filler_cycle() -> &'static [Source] {
        &[Self::Google, Self::Bing, Self::Yahoo, Self::Baidu]
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One discovered item.
///
/// No uniqueness is enforced on `title` or `url`; duplicates across sources
/// are possible and accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Display title, non-empty.
    pub title: String,
    /// Link target, [`PLACEHOLDER_URL`] when no real link exists.
    pub url: String,
    /// Free-text description; also the raw material for synthesis.
    pub snippet: String,
    /// Where this result came from.
    pub source: Source,
}

/// Result of one aggregation run.
///
/// Constructed once per search, immutable afterwards, discarded when the
/// next search starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The original user-entered query, unmodified.
    pub query: String,
    /// Display-only estimate. Not derived from the actual result count.
    pub total_results: u64,
    /// Display-only elapsed-time estimate in seconds.
    pub search_time: f64,
    /// Up to eight results: live sources in completion order, then filler.
    pub results: Vec<SearchResult>,
}
