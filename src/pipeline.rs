//! bytes → text → reply → record
//!
//! Each stage is a plain function over its input so any prefix of the
//! pipeline can run on its own; nothing is cached between runs.

use crate::ai::client::{AnalysisClient, ModelService};
use crate::ai::normalizer::Normalized;
use crate::document::{Document, DocumentParser, ExtractedText};
use crate::error::AnalyzerError;

/// Result of one full run
#[derive(Debug)]
pub struct Analysis {
    pub text: ExtractedText,
    pub normalized: Normalized,
}

/// Extract text from an uploaded document.
pub fn extract(document: &Document) -> Result<ExtractedText, AnalyzerError> {
    DocumentParser::new().extract(document)
}

/// Run one analysis over already extracted text.
pub async fn summarize<S: ModelService>(
    client: &AnalysisClient<S>,
    text: &ExtractedText,
) -> Result<Normalized, AnalyzerError> {
    client.analyze_document(text).await
}

/// Extract, analyze, and normalize a document. Extraction errors stop the
/// run before the model is called.
pub async fn run<S: ModelService>(
    client: &AnalysisClient<S>,
    document: Document,
) -> Result<Analysis, AnalyzerError> {
    let text = extract(&document)?;
    drop(document);

    let normalized = summarize(client, &text).await?;
    Ok(Analysis { text, normalized })
}
