//! Document input and text extraction
//!
//! A [`Document`] is the raw upload: bytes plus the MIME type the caller
//! declared for them. [`DocumentParser`] turns it into [`ExtractedText`].

mod parser;

pub use parser::{join_pages, join_paragraphs, DocumentParser};

use crate::error::AnalyzerError;
use std::fmt;
use std::path::Path;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Formats the extractor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Resolve a declared MIME type. Anything but PDF or DOCX is rejected.
    pub fn from_mime(mime: &str) -> Result<Self, AnalyzerError> {
        match mime.trim() {
            PDF_MIME => Ok(Self::Pdf),
            DOCX_MIME => Ok(Self::Docx),
            other => Err(AnalyzerError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Raw upload, consumed by extraction
#[derive(Clone)]
pub struct Document {
    pub name: String,
    pub bytes: Vec<u8>,
    pub declared_type: String,
}

impl Document {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bytes,
            declared_type: declared_type.into(),
        }
    }

    /// Load a file from disk. Without an explicit `mime`, the declared type
    /// is guessed from the extension the same way an upload widget would.
    pub fn from_path(path: &Path, mime: Option<&str>) -> Result<Self, AnalyzerError> {
        let declared_type = match mime {
            Some(m) => m.to_string(),
            None => mime_guess::from_path(path)
                .first_raw()
                .unwrap_or("application/octet-stream")
                .to_string(),
        };

        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        tracing::debug!(
            "[Document] Loaded {} ({} bytes, declared {})",
            name,
            bytes.len(),
            declared_type
        );

        Ok(Self::new(name, bytes, declared_type))
    }

    pub fn format(&self) -> Result<DocumentFormat, AnalyzerError> {
        DocumentFormat::from_mime(&self.declared_type)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("name", &self.name)
            .field("bytes", &self.bytes.len())
            .field("declared_type", &self.declared_type)
            .finish()
    }
}

/// Trimmed, non-empty plain text pulled out of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText(String);

impl ExtractedText {
    /// Trims `raw`; an empty result is [`AnalyzerError::EmptyContent`].
    pub fn new(raw: &str) -> Result<Self, AnalyzerError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AnalyzerError::EmptyContent);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl AsRef<str> for ExtractedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExtractedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_format_from_mime() {
        assert_eq!(DocumentFormat::from_mime(PDF_MIME).unwrap(), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_mime(DOCX_MIME).unwrap(), DocumentFormat::Docx);
        assert!(matches!(
            DocumentFormat::from_mime("text/plain"),
            Err(AnalyzerError::UnsupportedFormat(t)) if t == "text/plain"
        ));
        // The legacy Word type is not accepted
        assert!(DocumentFormat::from_mime("application/msword").is_err());
    }

    #[test]
    fn test_extracted_text_trims() {
        let text = ExtractedText::new("  \n Clause 1 \n\n").unwrap();
        assert_eq!(text.as_str(), "Clause 1");
    }

    #[test]
    fn test_extracted_text_empty_is_error() {
        assert!(matches!(ExtractedText::new(""), Err(AnalyzerError::EmptyContent)));
        assert!(matches!(ExtractedText::new(" \n\t\n "), Err(AnalyzerError::EmptyContent)));
    }

    #[test]
    fn test_from_path_guesses_mime() {
        let mut file = NamedTempFile::with_suffix(".pdf").unwrap();
        file.write_all(b"%PDF-1.4").unwrap();

        let doc = Document::from_path(file.path(), None).unwrap();
        assert_eq!(doc.declared_type, PDF_MIME);
        assert_eq!(doc.format().unwrap(), DocumentFormat::Pdf);
        assert_eq!(doc.bytes, b"%PDF-1.4");
    }

    #[test]
    fn test_from_path_docx_and_override() {
        let file = NamedTempFile::with_suffix(".docx").unwrap();
        let doc = Document::from_path(file.path(), None).unwrap();
        assert_eq!(doc.format().unwrap(), DocumentFormat::Docx);

        let doc = Document::from_path(file.path(), Some("text/plain")).unwrap();
        assert!(matches!(doc.format(), Err(AnalyzerError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_from_path_unknown_extension_is_unsupported() {
        let file = NamedTempFile::with_suffix(".zzz").unwrap();
        let doc = Document::from_path(file.path(), None).unwrap();
        assert!(matches!(doc.format(), Err(AnalyzerError::UnsupportedFormat(_))));
    }
}
