//! Paginated document export.
//!
//! Lays the synthesized documents and the result list out onto A4 pages
//! through the [`PageRenderer`] seam, tracking a running vertical cursor and
//! breaking pages when a block would overflow the printable height. The
//! concrete PDF backend lives in [`crate::pdf`]; tests drive the layout with
//! a recording mock instead.

use crate::docgen::DocumentationBundle;
use crate::types::SearchResult;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;
use thiserror::Error;

/// A4 page width in mm.
pub const PAGE_WIDTH: f32 = 210.0;
/// A4 page height in mm.
pub const PAGE_HEIGHT: f32 = 297.0;
/// Page margin in mm.
pub const MARGIN: f32 = 20.0;
/// Printable line width in mm.
pub const MAX_LINE_WIDTH: f32 = PAGE_WIDTH - MARGIN * 2.0;

/// Footer stamped on every page after layout completes.
const FOOTER_BRAND: &str = "SearchDocs AI - Generated Documentation";

/// The rendering capability is absent or failed during layout. The caller
/// must fall back to plain-text export.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("rendering unavailable: {0}")]
    RenderingUnavailable(String),
}

/// Font style selector for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Normal,
    Bold,
    Italic,
}

/// Minimal imperative page-rendering capability.
///
/// Implementors start with one page already open. Coordinates are in mm
/// from the top-left corner of the current page.
pub trait PageRenderer {
    /// Open a fresh page and make it current.
    fn add_page(&mut self);
    /// Make an existing page (0-based) current, for post-layout stamping.
    fn set_page(&mut self, index: usize);
    /// Number of pages created so far.
    fn page_count(&self) -> usize;
    /// Set the font used by subsequent width queries and draws.
    fn set_font(&mut self, size: f32, style: FontStyle);
    /// Width of `text` in mm at the current font.
    fn text_width(&self, text: &str) -> f32;
    /// Place `text` at an absolute position on the current page.
    fn draw_text(&mut self, text: &str, x: f32, y: f32);
    /// Write the rendered document to `path`.
    fn save(&mut self, path: &Path) -> Result<(), ExportError>;
}

lazy_static! {
    static ref HEADING_RE: Regex = Regex::new(r"#+\s").expect("valid heading pattern");
    static ref BOLD_RE: Regex = Regex::new(r"\*\*(.*?)\*\*").expect("valid bold pattern");
    static ref ITALIC_RE: Regex = Regex::new(r"\*(.*?)\*").expect("valid italic pattern");
    static ref LINK_RE: Regex = Regex::new(r"\[(.*?)\]\(.*?\)").expect("valid link pattern");
    static ref CODE_RE: Regex = Regex::new(r"`(.*?)`").expect("valid code pattern");
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").expect("valid whitespace pattern");
}

/// Strip inline Markdown markers (bold, italic, links, inline code) via
/// literal pattern substitution, leaving line-level structure for the
/// layout engine.
pub fn strip_inline_markdown(text: &str) -> String {
    let text = BOLD_RE.replace_all(text, "$1");
    let text = ITALIC_RE.replace_all(&text, "$1");
    let text = LINK_RE.replace_all(&text, "$1");
    let text = CODE_RE.replace_all(&text, "$1");
    text.into_owned()
}

/// Strip all Markdown syntax, heading markers included. A string containing
/// no Markdown syntax comes back unchanged apart from outer trimming.
pub fn markdown_to_plain(text: &str) -> String {
    let text = HEADING_RE.replace_all(text, "");
    strip_inline_markdown(&text).trim().to_string()
}

/// Content of the plain-text fallback file offered when rendering fails.
pub fn plain_text_fallback(bundle: &DocumentationBundle) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        bundle.title, bundle.quick_guide, bundle.detailed_documentation
    )
}

/// Output filename for the query: whitespace runs become underscores and a
/// fixed suffix is appended.
pub fn export_filename(query: &str, extension: &str) -> String {
    format!(
        "{}_documentation.{extension}",
        WHITESPACE_RE.replace_all(query, "_")
    )
}

/// Lay out the full document on `renderer`: title page metadata, table of
/// contents, quick guide, numbered result listing, detailed documentation,
/// then a footer stamp on every page.
pub fn render<R: PageRenderer>(
    renderer: &mut R,
    bundle: &DocumentationBundle,
    results: &[SearchResult],
) -> Result<(), ExportError> {
    let mut layout = Layout::new(renderer);

    layout.title(&bundle.title);
    layout.space(10.0);

    let generated = chrono::Local::now().format("%Y-%m-%d");
    layout.text(&format!("Generated on: {generated}"), 10.0, FontStyle::Italic);
    layout.text(
        &format!("Search Results: {} sources", results.len()),
        10.0,
        FontStyle::Italic,
    );
    layout.space(15.0);

    layout.heading("Table of Contents", 14.0);
    layout.text("1. Quick Guide", 10.0, FontStyle::Normal);
    layout.text("2. Search Results Summary", 10.0, FontStyle::Normal);
    layout.text("3. Complete Documentation", 10.0, FontStyle::Normal);
    layout.space(15.0);

    layout.break_page_if_needed(50.0);
    layout.heading("1. Quick Guide", 14.0);
    layout.space(5.0);
    layout.formatted(&strip_inline_markdown(&bundle.quick_guide));
    layout.space(15.0);

    layout.break_page_if_needed(80.0);
    layout.heading("2. Search Results Summary", 14.0);
    layout.space(5.0);
    for (index, result) in results.iter().enumerate() {
        layout.break_page_if_needed(40.0);
        layout.text(
            &format!("{}. {}", index + 1, result.title),
            11.0,
            FontStyle::Bold,
        );
        layout.text(&format!("Source: {}", result.source), 9.0, FontStyle::Italic);
        layout.text(&format!("URL: {}", result.url), 9.0, FontStyle::Normal);
        layout.text(&result.snippet, 10.0, FontStyle::Normal);
        layout.space(8.0);
    }

    layout.break_page_if_needed(50.0);
    layout.heading("3. Complete Documentation", 14.0);
    layout.space(5.0);
    layout.formatted(&strip_inline_markdown(&bundle.detailed_documentation));

    layout.stamp_footers();
    Ok(())
}

/// Cursor-tracking layout over a [`PageRenderer`].
struct Layout<'a, R: PageRenderer> {
    renderer: &'a mut R,
    cursor_y: f32,
}

impl<'a, R: PageRenderer> Layout<'a, R> {
    fn new(renderer: &'a mut R) -> Self {
        Self {
            renderer,
            cursor_y: MARGIN,
        }
    }

    /// Centered document title.
    fn title(&mut self, text: &str) {
        self.renderer.set_font(20.0, FontStyle::Bold);
        let width = self.renderer.text_width(text);
        let x = (PAGE_WIDTH - width) / 2.0;
        self.renderer.draw_text(text, x, self.cursor_y);
        self.cursor_y += 15.0;
    }

    fn heading(&mut self, text: &str, size: f32) {
        self.renderer.set_font(size, FontStyle::Bold);
        self.renderer.draw_text(text, MARGIN, self.cursor_y);
        self.cursor_y += size * 0.6;
    }

    /// Body text wrapped to the printable line width.
    fn text(&mut self, text: &str, size: f32, style: FontStyle) {
        self.renderer.set_font(size, style);
        for line in split_to_width(self.renderer, text, MAX_LINE_WIDTH) {
            self.break_page_if_needed(10.0);
            self.renderer.draw_text(&line, MARGIN, self.cursor_y);
            self.cursor_y += size * 0.6;
        }
    }

    /// Heading- and bullet-aware rendering of a Markdown-ish document.
    fn formatted(&mut self, text: &str) {
        for line in text.lines() {
            if line.trim().is_empty() {
                self.space(4.0);
            } else if let Some(rest) = line.strip_prefix("# ") {
                self.section(rest, 14.0, 8.0, 4.0);
            } else if let Some(rest) = line.strip_prefix("## ") {
                self.section(rest, 12.0, 6.0, 3.0);
            } else if let Some(rest) = line.strip_prefix("### ") {
                self.section(rest, 11.0, 4.0, 2.0);
            } else if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("• ")) {
                self.text(&format!("  • {rest}"), 10.0, FontStyle::Normal);
            } else {
                self.text(line, 10.0, FontStyle::Normal);
            }
        }
    }

    /// Spaced heading that moves to a fresh page rather than land below the
    /// printable height.
    fn section(&mut self, text: &str, size: f32, before: f32, after: f32) {
        self.space(before);
        self.break_page_if_needed(size * 0.6 + after);
        self.heading(text, size);
        self.space(after);
    }

    fn space(&mut self, amount: f32) {
        self.cursor_y += amount;
    }

    fn break_page_if_needed(&mut self, required: f32) {
        if self.cursor_y + required > PAGE_HEIGHT - MARGIN {
            self.renderer.add_page();
            self.cursor_y = MARGIN;
        }
    }

    /// Page-number footer on every page, computed from the final count.
    fn stamp_footers(&mut self) {
        let total = self.renderer.page_count();
        for page in 0..total {
            self.renderer.set_page(page);
            self.renderer.set_font(8.0, FontStyle::Normal);
            self.renderer
                .draw_text(FOOTER_BRAND, MARGIN, PAGE_HEIGHT - 10.0);
            self.renderer.draw_text(
                &format!("Page {} of {total}", page + 1),
                PAGE_WIDTH - MARGIN - 20.0,
                PAGE_HEIGHT - 10.0,
            );
        }
    }
}

/// Greedy word wrap against the renderer's width measurement.
fn split_to_width<R: PageRenderer + ?Sized>(
    renderer: &R,
    text: &str,
    max_width: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if current.is_empty() || renderer.text_width(&candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
