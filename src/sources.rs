//! Upstream payload shapes and their adapters.
//!
//! Each live source has a typed payload struct and an adapter turning it
//! into zero or more [`SearchResult`]s. The filler generator lives here too,
//! since it is just another (synthetic) source of results.

use crate::config::SourcesConfig;
use crate::types::{SearchResult, Source, PLACEHOLDER_URL};
use serde::Deserialize;

/// Title templates cycled through by the filler generator.
const FILLER_TITLES: &[&str] = &[
    "Guide",
    "Tutorial",
    "Documentation",
    "Best Practices",
    "Overview",
];

/// DuckDuckGo instant-answer payload. Only the fields we consume.
#[derive(Debug, Default, Deserialize)]
pub struct InstantAnswer {
    #[serde(default, rename = "Abstract")]
    pub abstract_text: String,
    #[serde(default, rename = "AbstractURL")]
    pub abstract_url: String,
    #[serde(default, rename = "Heading")]
    pub heading: String,
    #[serde(default, rename = "Definition")]
    pub definition: String,
    #[serde(default, rename = "DefinitionURL")]
    pub definition_url: String,
    #[serde(default, rename = "RelatedTopics")]
    pub related_topics: Vec<RelatedTopic>,
}

/// One entry of the instant answer's related-topics list.
///
/// The list also carries topic-group entries without `Text`/`FirstURL`;
/// those deserialize to empty strings and are filtered out by the adapter.
#[derive(Debug, Default, Deserialize)]
pub struct RelatedTopic {
    #[serde(default, rename = "Text")]
    pub text: String,
    #[serde(default, rename = "FirstURL")]
    pub first_url: String,
}

/// Wikipedia page-summary payload. Only the fields we consume.
#[derive(Debug, Default, Deserialize)]
pub struct PageSummary {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub extract: String,
    #[serde(default)]
    pub content_urls: Option<ContentUrls>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContentUrls {
    #[serde(default)]
    pub desktop: Option<DesktopUrls>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DesktopUrls {
    #[serde(default)]
    pub page: String,
}

/// Request URL for the instant-answer source.
pub fn instant_answer_url(config: &SourcesConfig, query: &str) -> String {
    format!(
        "{}?q={}&format=json&no_html=1&skip_disambig=1",
        config.instant_answer_url,
        urlencoding::encode(query)
    )
}

/// Request URL for the encyclopedia summary source.
pub fn summary_url(config: &SourcesConfig, query: &str) -> String {
    format!("{}{}", config.encyclopedia_url, urlencoding::encode(query))
}

/// Adapt an instant-answer payload into results: up to one overview, one
/// definition, and three related topics.
pub fn adapt_instant_answer(query: &str, answer: &InstantAnswer) -> Vec<SearchResult> {
    let mut results = Vec::new();

    if !answer.abstract_text.is_empty() {
        let title = if answer.heading.is_empty() {
            format!("{query} - Overview")
        } else {
            answer.heading.clone()
        };
        let url = if answer.abstract_url.is_empty() {
            format!("https://duckduckgo.com/?q={}", urlencoding::encode(query))
        } else {
            answer.abstract_url.clone()
        };
        results.push(SearchResult {
            title,
            url,
            snippet: answer.abstract_text.clone(),
            source: Source::DuckDuckGo,
        });
    }

    if !answer.definition.is_empty() && !answer.definition_url.is_empty() {
        results.push(SearchResult {
            title: format!("{query} - Definition"),
            url: answer.definition_url.clone(),
            snippet: answer.definition.clone(),
            source: Source::DuckDuckGo,
        });
    }

    for topic in answer.related_topics.iter().take(3) {
        if topic.text.is_empty() || topic.first_url.is_empty() {
            continue;
        }
        results.push(SearchResult {
            title: topic_title(&topic.text),
            url: topic.first_url.clone(),
            snippet: topic.text.clone(),
            source: Source::DuckDuckGo,
        });
    }

    results
}

/// Adapt a page-summary payload into at most one encyclopedia result.
pub fn adapt_page_summary(summary: &PageSummary) -> Vec<SearchResult> {
    if summary.extract.is_empty() {
        return Vec::new();
    }

    let url = summary
        .content_urls
        .as_ref()
        .and_then(|urls| urls.desktop.as_ref())
        .map(|desktop| desktop.page.clone())
        .filter(|page| !page.is_empty())
        .unwrap_or_else(|| PLACEHOLDER_URL.to_string());

    vec![SearchResult {
        title: summary.title.clone(),
        url,
        snippet: summary.extract.clone(),
        source: Source::Wikipedia,
    }]
}

/// Title for a related topic: the text before the first `" - "` separator,
/// or the first 60 characters when no separator exists.
fn topic_title(text: &str) -> String {
    match text.split_once(" - ") {
        Some((prefix, _)) => prefix.to_string(),
        None => text.chars().take(60).collect(),
    }
}

/// Synthesize `count` filler results for `query`, cycling through the four
/// filler origins and five title templates.
pub fn filler_results(query: &str, count: usize) -> Vec<SearchResult> {
    let cycle = Source::filler_cycle();
    let slug = query
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");

    (0..count)
        .map(|i| SearchResult {
            title: format!("{query} - {}", FILLER_TITLES[i % FILLER_TITLES.len()]),
            url: format!("https://example{}.com/{slug}", i + 1),
            snippet: format!(
                "Comprehensive information about {query}. This resource covers essential \
                 concepts, practical applications, and detailed explanations that will help \
                 you understand {query} better. Learn from expert insights and real-world \
                 examples."
            ),
            source: cycle[i % cycle.len()],
        })
        .collect()
}
