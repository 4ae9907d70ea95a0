//! PDF backend for the exporter, built on printpdf.
//!
//! Implements [`PageRenderer`] with A4 pages and the builtin Helvetica
//! faces. printpdf does not measure builtin-font text, so widths are
//! estimated from an average glyph width; the layout only uses them for
//! centering and line wrapping.

use crate::docgen::DocumentationBundle;
use crate::export::{self, ExportError, FontStyle, PageRenderer, PAGE_HEIGHT, PAGE_WIDTH};
use crate::types::SearchResult;
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerIndex,
    PdfPageIndex,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Average Helvetica glyph width as a fraction of the font size.
const GLYPH_WIDTH_RATIO: f32 = 0.5;

/// Points to millimetres.
const PT_TO_MM: f32 = 0.352_778;

/// [`PageRenderer`] producing a real PDF file.
pub struct PdfRenderer {
    doc: Option<PdfDocumentReference>,
    pages: Vec<(PdfPageIndex, PdfLayerIndex)>,
    current: usize,
    normal: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    font_size: f32,
    font_style: FontStyle,
}

impl PdfRenderer {
    /// Create a renderer with one open A4 page.
    pub fn new(title: &str) -> Result<Self, ExportError> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "page");

        let normal = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::RenderingUnavailable(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ExportError::RenderingUnavailable(e.to_string()))?;
        let italic = doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(|e| ExportError::RenderingUnavailable(e.to_string()))?;

        Ok(Self {
            doc: Some(doc),
            pages: vec![(page, layer)],
            current: 0,
            normal,
            bold,
            italic,
            font_size: 10.0,
            font_style: FontStyle::Normal,
        })
    }

    fn font(&self) -> &IndirectFontRef {
        match self.font_style {
            FontStyle::Normal => &self.normal,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
        }
    }
}

impl PageRenderer for PdfRenderer {
    fn add_page(&mut self) {
        if let Some(doc) = &self.doc {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "page");
            self.pages.push((page, layer));
            self.current = self.pages.len() - 1;
        }
    }

    fn set_page(&mut self, index: usize) {
        if index < self.pages.len() {
            self.current = index;
        }
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn set_font(&mut self, size: f32, style: FontStyle) {
        self.font_size = size;
        self.font_style = style;
    }

    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.font_size * GLYPH_WIDTH_RATIO * PT_TO_MM
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32) {
        if let Some(doc) = &self.doc {
            let (page, layer) = self.pages[self.current];
            // The layout works top-down; printpdf's origin is bottom-left.
            doc.get_page(page).get_layer(layer).use_text(
                text,
                self.font_size,
                Mm(x),
                Mm(PAGE_HEIGHT - y),
                self.font(),
            );
        }
    }

    fn save(&mut self, path: &Path) -> Result<(), ExportError> {
        let doc = self
            .doc
            .take()
            .ok_or_else(|| ExportError::RenderingUnavailable("document already saved".into()))?;
        let file =
            File::create(path).map_err(|e| ExportError::RenderingUnavailable(e.to_string()))?;
        doc.save(&mut BufWriter::new(file))
            .map_err(|e| ExportError::RenderingUnavailable(e.to_string()))
    }
}

/// Render `bundle` and `results` into a PDF at `path`.
///
/// # Errors
///
/// [`ExportError::RenderingUnavailable`] when the backend cannot lay out or
/// write the document; the caller falls back to plain-text export.
pub fn export_pdf(
    bundle: &DocumentationBundle,
    results: &[SearchResult],
    path: &Path,
) -> Result<(), ExportError> {
    let mut renderer = PdfRenderer::new(&bundle.title)?;
    export::render(&mut renderer, bundle, results)?;
    renderer.save(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Source;

    fn bundle() -> DocumentationBundle {
        DocumentationBundle {
            title: "Complete Guide to rust".into(),
            quick_guide: "# Quick Start Guide for Rust\n\n• A bullet".into(),
            detailed_documentation: "# Complete Documentation for Rust\n\nSome body.".into(),
        }
    }

    #[test]
    fn export_pdf_writes_a_pdf_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("rust_documentation.pdf");

        let results = vec![SearchResult {
            title: "Rust".into(),
            url: "https://www.rust-lang.org/".into(),
            snippet: "A language empowering everyone.".into(),
            source: Source::DuckDuckGo,
        }];

        export_pdf(&bundle(), &results, &path).expect("export");

        let bytes = std::fs::read(&path).expect("read back");
        assert!(bytes.starts_with(b"%PDF"), "output is not a PDF");
        assert!(bytes.len() > 500);
    }

    #[test]
    fn save_twice_reports_rendering_unavailable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("doc.pdf");

        let mut renderer = PdfRenderer::new("t").expect("renderer");
        renderer.save(&path).expect("first save");
        assert!(matches!(
            renderer.save(&path),
            Err(ExportError::RenderingUnavailable(_))
        ));
    }

    #[test]
    fn width_estimate_scales_with_font_size() {
        let mut renderer = PdfRenderer::new("t").expect("renderer");
        renderer.set_font(10.0, FontStyle::Normal);
        let small = renderer.text_width("hello");
        renderer.set_font(20.0, FontStyle::Normal);
        let large = renderer.text_width("hello");
        assert!((large - small * 2.0).abs() < 0.001);
    }
}
