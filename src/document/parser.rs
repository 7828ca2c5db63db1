//! Document Parser Module
//!
//! Pure Rust text extraction, no system libraries required.
//!
//! ## Supported Formats
//! - PDF: page-by-page extraction via pdf-extract
//! - Word: .docx paragraphs via docx-rs
//!
//! Pages that yield no text are skipped; DOCX paragraphs are kept one per
//! line, empty ones included. Both results are trimmed and an empty result
//! is reported as [`AnalyzerError::EmptyContent`].

use super::{Document, DocumentFormat, ExtractedText};
use crate::error::AnalyzerError;

/// Stateless extractor for PDF and DOCX uploads
pub struct DocumentParser;

impl DocumentParser {
    pub fn new() -> Self {
        Self
    }

    /// Extract plain text from a document.
    ///
    /// The declared format is checked before any bytes are parsed, so an
    /// unsupported upload never reaches a parser.
    pub fn extract(&self, document: &Document) -> Result<ExtractedText, AnalyzerError> {
        let format = document.format()?;

        tracing::info!(
            "[DocumentParser] Extracting {:?}: {} ({} bytes)",
            format,
            document.name,
            document.bytes.len()
        );

        let raw = match format {
            DocumentFormat::Pdf => self.extract_pdf(&document.bytes)?,
            DocumentFormat::Docx => self.extract_docx(&document.bytes)?,
        };

        let text = ExtractedText::new(&raw).inspect_err(|_| {
            tracing::warn!("[DocumentParser] No text extracted from {}", document.name);
        })?;

        tracing::info!(
            "[DocumentParser] Extracted {} chars, {} words from {}",
            text.char_count(),
            text.as_str().split_whitespace().count(),
            document.name
        );

        Ok(text)
    }

    /// Extract text from PDF bytes, one entry per page.
    /// Wrapped in catch_unwind to handle panics from malformed PDFs
    fn extract_pdf(&self, bytes: &[u8]) -> Result<String, AnalyzerError> {
        // pdf_extract (and its cff-parser dependency) can panic on certain fonts/glyphs
        let pages = match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        })) {
            Ok(Ok(pages)) => pages,
            Ok(Err(e)) => {
                tracing::warn!("[DocumentParser] PDF extraction FAILED: {}", e);
                return Err(AnalyzerError::Extraction(format!("PDF extraction failed: {}", e)));
            }
            Err(_panic) => {
                tracing::error!(
                    "[DocumentParser] PDF extraction PANICKED - likely malformed font/glyph"
                );
                return Err(AnalyzerError::Extraction(
                    "PDF extraction panicked - likely contains malformed fonts".to_string(),
                ));
            }
        };

        tracing::debug!("[DocumentParser] PDF has {} pages", pages.len());
        Ok(join_pages(&pages))
    }

    /// Extract text from DOCX bytes, one line per top-level paragraph
    fn extract_docx(&self, bytes: &[u8]) -> Result<String, AnalyzerError> {
        let doc = docx_rs::read_docx(bytes)
            .map_err(|e| AnalyzerError::Extraction(format!("Failed to parse DOCX: {}", e)))?;

        let paragraphs: Vec<String> = doc
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                docx_rs::DocumentChild::Paragraph(para) => Some(Self::paragraph_text(para)),
                _ => None,
            })
            .collect();

        tracing::debug!("[DocumentParser] DOCX has {} paragraphs", paragraphs.len());
        Ok(join_paragraphs(&paragraphs))
    }

    fn paragraph_text(para: &docx_rs::Paragraph) -> String {
        let mut output = String::new();
        for child in &para.children {
            Self::push_paragraph_child(child, &mut output);
        }
        output
    }

    fn push_paragraph_child(child: &docx_rs::ParagraphChild, output: &mut String) {
        match child {
            docx_rs::ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        docx_rs::RunChild::Text(text) => output.push_str(&text.text),
                        docx_rs::RunChild::Tab(_) => output.push('\t'),
                        docx_rs::RunChild::Break(_) => output.push('\n'),
                        _ => {}
                    }
                }
            }
            // Runs nested in hyperlinks are still paragraph text
            docx_rs::ParagraphChild::Hyperlink(link) => {
                for nested in &link.children {
                    Self::push_paragraph_child(nested, output);
                }
            }
            _ => {}
        }
    }
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Join per-page PDF text, one newline between pages.
///
/// pdf-extract opens every page with a page-break `"\n\n"`; that and any
/// other surrounding whitespace is dropped, and pages left with no text
/// contribute nothing.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(|page| page.as_ref().trim())
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Join DOCX paragraphs. Empty paragraphs stay as empty lines.
pub fn join_paragraphs<S: AsRef<str>>(paragraphs: &[S]) -> String {
    paragraphs
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
