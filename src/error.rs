//! Error taxonomy for the summarizer pipeline
//!
//! Every failure is shown to the user where it happens. Nothing is retried.
//! A reply that cannot be structured is not an error at all: the normalizer
//! degrades instead (see [`StructuredParseFailure`]).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Credential missing at startup. Fatal before any input is accepted.
    #[error("Gemini API key not found. Please set {0}.")]
    Configuration(String),

    /// The OS credential store refused a read or write
    #[error("Credential store error: {0}")]
    Credential(String),

    /// Declared file type is neither PDF nor DOCX
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Extraction ran but produced nothing after trimming
    #[error("No text extracted from the document.")]
    EmptyContent,

    /// The document bytes could not be parsed
    #[error("Text extraction failed: {0}")]
    Extraction(String),

    /// The model call failed or returned no usable text
    #[error("Gemini request failed: {0}")]
    Service(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalyzerError {
    /// Process exit code for the CLI
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Configuration(_) | Self::Credential(_) => 78,
            Self::UnsupportedFormat(_) | Self::EmptyContent => 65,
            _ => 1,
        }
    }
}

impl From<reqwest::Error> for AnalyzerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Service(format!("request timed out: {}", err))
        } else {
            Self::Service(err.to_string())
        }
    }
}

/// Why a model reply could not be recovered as a structured record
#[derive(Debug, Error)]
pub enum StructuredParseFailure {
    #[error("reply is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("reply is JSON but not an object (found {0})")]
    NotAnObject(&'static str),
}
