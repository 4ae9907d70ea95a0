//! # searchdocs
//!
//! A CLI tool that turns a free-text query into downloadable documentation.
//!
//! ## Pipeline
//!
//! - **Aggregate**: query the DuckDuckGo instant-answer and Wikipedia
//!   summary APIs concurrently, normalize the payloads into one result
//!   shape, and backfill with synthetic filler when too little comes back
//! - **Synthesize**: extract key points and concepts from the result text
//!   and interpolate them into a quick guide and a long-form guide
//! - **Export**: render both guides and the result list as a paginated PDF,
//!   with a plain-text fallback when rendering fails
//!
//! Each run is stateless: nothing is cached or persisted between searches.

pub mod client;
pub mod config;
pub mod docgen;
pub mod export;
pub mod pdf;
pub mod search;
pub mod sources;
pub mod types;

pub use config::Config;
pub use docgen::DocumentationBundle;
pub use types::{SearchResponse, SearchResult, Source};
