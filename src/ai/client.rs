use async_trait::async_trait;

use super::normalizer::{normalize, Normalized};
use super::prompts::build_analysis_prompt;
use crate::document::ExtractedText;
use crate::error::AnalyzerError;

/// A generative model reachable with a single prompt → text round trip
#[async_trait]
pub trait ModelService: Send + Sync {
    /// Send one prompt and return the raw reply text, untouched
    async fn generate(&self, prompt: &str) -> Result<String, AnalyzerError>;

    /// Model identifier, for logs
    fn model_name(&self) -> &str;
}

/// Builds the analysis prompt and makes exactly one model call per request.
/// Failures are returned as-is; nothing is retried.
pub struct AnalysisClient<S> {
    service: S,
}

impl<S: ModelService> AnalysisClient<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// Ask the model to analyze `text`, returning its raw reply
    pub async fn analyze(&self, text: &ExtractedText) -> Result<String, AnalyzerError> {
        let prompt = build_analysis_prompt(text.as_str());

        tracing::info!(
            "[AI] Requesting analysis from {} ({} chars of document text)",
            self.service.model_name(),
            text.char_count()
        );

        let reply = self.service.generate(&prompt).await.inspect_err(|e| {
            tracing::error!("[AI] Analysis request failed: {}", e);
        })?;

        tracing::info!("[AI] Analysis response length: {} chars", reply.len());
        Ok(reply)
    }

    /// Analyze and recover the structured record in one step
    pub async fn analyze_document(&self, text: &ExtractedText) -> Result<Normalized, AnalyzerError> {
        let reply = self.analyze(text).await?;
        Ok(normalize(&reply))
    }

    pub fn service(&self) -> &S {
        &self.service
    }
}
