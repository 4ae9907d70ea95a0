//! searchdocs CLI - search the web, get documentation
//!
//! The pipeline logic is contained in lib.rs, and this file is responsible
//! for parsing arguments, progress display, and top-level error handling.

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use searchdocs::export::ExportError;
use searchdocs::{docgen, export, pdf, search, Config, SearchResponse};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "searchdocs")]
#[command(author, version, about = "Turn a web search into downloadable documentation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search and generate a documentation document (PDF, or text fallback)
    Generate {
        /// Search query
        query: String,
        /// Write plain text instead of a PDF
        #[arg(long)]
        text: bool,
        /// Output directory (defaults to the configured one)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Search and print the aggregated results without generating documents
    Search {
        /// Search query
        query: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Generate {
            query,
            text,
            output,
        } => {
            search::validate_query(&query)?;
            let response = run_search(&query, &config).await;
            print_results(&response);

            progress(95, "Generating documentation");
            let bundle = docgen::synthesize(&query, &response.results);

            let out_dir = output.unwrap_or_else(|| config.output.dir.clone());
            if text {
                let path = write_text_fallback(&bundle, &query, &out_dir)?;
                println!("{} {}", "Saved".green().bold(), path.display());
            } else {
                let path = out_dir.join(export::export_filename(&query, "pdf"));
                match pdf::export_pdf(&bundle, &response.results, &path) {
                    Ok(()) => {
                        println!("{} {}", "Saved".green().bold(), path.display());
                    }
                    Err(ExportError::RenderingUnavailable(reason)) => {
                        // Degraded export: offer the raw text instead.
                        eprintln!(
                            "{} {reason}",
                            "PDF generation failed, falling back to text:".yellow()
                        );
                        let path = write_text_fallback(&bundle, &query, &out_dir)?;
                        println!("{} {}", "Saved".green().bold(), path.display());
                    }
                }
            }
        }
        Commands::Search { query } => {
            search::validate_query(&query)?;
            let response = run_search(&query, &config).await;
            print_results(&response);
        }
    }

    Ok(())
}

/// Run the aggregation with progress lines on stderr.
async fn run_search(query: &str, config: &Config) -> SearchResponse {
    println!("Searching: {query}");
    search::aggregate(query, &config.sources, progress).await
}

/// Progress display, the CLI stand-in for the original UI's toasts.
fn progress(pct: u8, message: &str) {
    eprintln!("{} {message}", format!("[{pct:>3}%]").dimmed());
}

fn print_results(response: &SearchResponse) {
    println!(
        "\nFound ~{} results in {:.2}s\n",
        response.total_results, response.search_time
    );
    for (n, result) in response.results.iter().enumerate() {
        println!(
            "{}. {} {}",
            n + 1,
            result.title.bold(),
            format!("[{}]", result.source).cyan()
        );
        println!("   {}", result.url.dimmed());
        println!("   {}\n", result.snippet);
    }
}

/// Write the plain-text rendition of the bundle and return its path.
fn write_text_fallback(
    bundle: &searchdocs::DocumentationBundle,
    query: &str,
    out_dir: &Path,
) -> anyhow::Result<PathBuf> {
    let path = out_dir.join(export::export_filename(query, "txt"));
    std::fs::write(&path, export::plain_text_fallback(bundle))
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
