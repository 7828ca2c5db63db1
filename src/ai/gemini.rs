//! Gemini API Client
//!
//! One `generateContent` call per analysis. No streaming, no retries; the
//! only timeout is the shared HTTP client's.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::client::ModelService;
use super::http_client::gemini_client;
use crate::config::Config;
use crate::error::AnalyzerError;

/// Gemini generative model client
pub struct GeminiClient {
    client: Client,
    config: Config,
}

impl GeminiClient {
    pub fn new(config: Config) -> Self {
        Self::with_http_client(config, gemini_client().clone())
    }

    pub fn with_http_client(config: Config, client: Client) -> Self {
        Self { client, config }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base, self.config.model
        )
    }
}

#[async_trait]
impl ModelService for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, AnalyzerError> {
        let request = GenerateRequest::from_prompt(prompt);
        let started = Instant::now();

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(api_error(status, &error_text));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AnalyzerError::Service(format!("Failed to parse response: {}", e)))?;

        let text = body.into_text()?;

        tracing::info!(
            model = %self.config.model,
            elapsed_ms = started.elapsed().as_millis() as u64,
            chars = text.len(),
            "Gemini reply received"
        );

        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

fn api_error(status: StatusCode, error_text: &str) -> AnalyzerError {
    if let Ok(api_error) = serde_json::from_str::<ApiError>(error_text) {
        return AnalyzerError::Service(format!("API error ({}): {}", status, api_error.error.message));
    }
    AnalyzerError::Service(format!("API error ({}): {}", status, error_text))
}

// API request/response types

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

impl GenerateRequest {
    fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl GenerateResponse {
    /// Concatenate the text parts of the first candidate
    fn into_text(self) -> Result<String, AnalyzerError> {
        let block_reason = self.prompt_feedback.and_then(|f| f.block_reason);

        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(AnalyzerError::Service(match block_reason {
                Some(reason) => format!("Prompt was blocked: {}", reason),
                None => "No response from Gemini".to_string(),
            }));
        };

        let texts: Vec<String> = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if texts.is_empty() {
            return Err(AnalyzerError::Service(format!(
                "Gemini returned no text (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(texts.concat())
    }
}
