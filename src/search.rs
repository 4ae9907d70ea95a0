//! Result aggregation across the upstream sources.
//!
//! Queries the instant-answer and encyclopedia endpoints concurrently,
//! reports progress in completion order, swallows per-source failures, and
//! backfills with synthetic filler when the live sources return too little.

use crate::client::{self, SourceError};
use crate::config::SourcesConfig;
use crate::sources;
use crate::types::{SearchResponse, SearchResult, Source};
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use rand::Rng;
use std::time::Duration;
use thiserror::Error;

/// Hard cap on the returned result list.
pub const MAX_RESULTS: usize = 8;

/// Below this many real results the filler generator kicks in.
const MIN_REAL_RESULTS: usize = 3;

/// Filler tops the list up to this many entries.
const BACKFILL_TARGET: usize = 5;

/// The query was rejected before any network call.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    #[error("please enter a search query")]
    Empty,
}

/// Reject blank or whitespace-only queries before aggregation begins.
pub fn validate_query(query: &str) -> Result<&str, QueryError> {
    if query.trim().is_empty() {
        Err(QueryError::Empty)
    } else {
        Ok(query)
    }
}

/// Aggregate results for `query` from all sources.
///
/// Never fails: every source failure is caught at that source's boundary
/// and treated as zero results from it. `progress` is invoked once per
/// settled source with a monotonically increasing percentage and a status
/// message, then once more at 90% after both sources have settled. If the
/// HTTP client cannot be built, a single call reports the search as
/// unavailable instead.
pub async fn aggregate<F>(query: &str, config: &SourcesConfig, progress: F) -> SearchResponse
where
    F: FnMut(u8, &str),
{
    let http = match client::create_client() {
        Ok(http) => Some(http),
        Err(err) => {
            tracing::warn!(error = %err, "failed to build HTTP client");
            None
        }
    };
    aggregate_with(query, config, http, progress).await
}

async fn aggregate_with<F>(
    query: &str,
    config: &SourcesConfig,
    http: Option<reqwest::Client>,
    mut progress: F,
) -> SearchResponse
where
    F: FnMut(u8, &str),
{
    let mut all_results: Vec<SearchResult> = Vec::new();

    match http {
        Some(http) => {
            let http = &http;
            let mut pending: FuturesUnordered<
                BoxFuture<'_, (Source, Result<Vec<SearchResult>, SourceError>)>,
            > = FuturesUnordered::new();

            pending.push(Box::pin(async move {
                (
                    Source::DuckDuckGo,
                    search_instant_answer(http, config, query).await,
                )
            }));
            pending.push(Box::pin(async move {
                (
                    Source::Wikipedia,
                    search_encyclopedia(http, config, query).await,
                )
            }));

            let total_sources = 2u32;
            let mut settled = 0u32;

            while let Some((source, outcome)) = pending.next().await {
                settled += 1;
                let pct = (settled * 80 / total_sources) as u8;
                match outcome {
                    Ok(results) => {
                        tracing::debug!(%source, count = results.len(), "source returned results");
                        all_results.extend(results);
                        progress(pct, &format!("Searched {source}"));
                    }
                    Err(err) => {
                        tracing::warn!(%source, error = %err, "source query failed");
                        progress(pct, &format!("{source} search completed"));
                    }
                }
            }
        }
        None => {
            // No client means no source ran; the aggregation still
            // completes on filler alone.
            progress(80, "Search unavailable");
        }
    }

    progress(90, "Processing results");
    finalize(query, all_results)
}

/// Backfill, cap, and attach the display metrics.
fn finalize(query: &str, mut results: Vec<SearchResult>) -> SearchResponse {
    if results.len() < MIN_REAL_RESULTS {
        let missing = BACKFILL_TARGET - results.len();
        results.extend(sources::filler_results(query, missing));
    }
    results.truncate(MAX_RESULTS);

    let mut rng = rand::thread_rng();
    SearchResponse {
        query: query.to_string(),
        // Display-only estimates, not measurements. Matches the observed
        // behaviour of the original tool.
        total_results: rng.gen_range(10_000..110_000),
        search_time: rng.gen_range(0.3..1.8),
        results,
    }
}

/// Query the instant-answer source: direct GET with a timeout first, then
/// the relay-proxy fallback if the direct strategy rejects.
async fn search_instant_answer(
    http: &reqwest::Client,
    config: &SourcesConfig,
    query: &str,
) -> Result<Vec<SearchResult>, SourceError> {
    let url = sources::instant_answer_url(config, query);
    let timeout = Duration::from_secs(config.timeout_secs);

    let answer = match client::get_json_timed::<sources::InstantAnswer>(http, &url, timeout).await {
        Ok(answer) => answer,
        Err(err) => {
            tracing::debug!(error = %err, "direct instant-answer request failed");
            client::get_json_relayed(http, config, &url).await?
        }
    };

    Ok(sources::adapt_instant_answer(query, &answer))
}

/// Query the encyclopedia summary source: a single GET by page title.
async fn search_encyclopedia(
    http: &reqwest::Client,
    config: &SourcesConfig,
    query: &str,
) -> Result<Vec<SearchResult>, SourceError> {
    let url = sources::summary_url(config, query);
    let summary: sources::PageSummary = http.get(&url).send().await?.json().await?;
    Ok(sources::adapt_page_summary(&summary))
}
