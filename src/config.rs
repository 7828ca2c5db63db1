//! Runtime configuration
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file. The API key is mandatory and resolved once at startup.

use crate::ai::credentials::{CredentialManager, CredentialSource};
use crate::error::AnalyzerError;
use std::fmt;

pub const MODEL_ENV: &str = "GEMINI_MODEL";
pub const API_BASE_ENV: &str = "GEMINI_API_BASE";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Load `.env` - try multiple locations.
/// Check current dir first, then the parent directory.
pub fn load_dotenv() {
    if dotenvy::dotenv().is_err() {
        let _ = dotenvy::from_path("../.env");
    }
}

#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
}

impl Config {
    /// Resolve configuration from the environment and credential store.
    pub fn load() -> Result<Self, AnalyzerError> {
        let (api_key, source) = CredentialManager::get_api_key()?;
        let config = Self::from_parts(
            api_key,
            std::env::var(MODEL_ENV).ok(),
            std::env::var(API_BASE_ENV).ok(),
        );

        let key_source = match source {
            CredentialSource::Environment => "environment",
            CredentialSource::Keyring => "keyring",
        };
        tracing::info!(model = %config.model, key_source, "Configuration loaded");

        Ok(config)
    }

    /// Build a config; blank optional values fall back to the defaults.
    pub fn from_parts(api_key: String, model: Option<String>, api_base: Option<String>) -> Self {
        let model = model
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let api_base = api_base
            .map(|b| b.trim().trim_end_matches('/').to_string())
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Self {
            api_key,
            model,
            api_base,
        }
    }

    /// Override the model for one invocation
    pub fn with_model(mut self, model: Option<String>) -> Self {
        if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
            self.model = model.trim().to_string();
        }
        self
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_parts("key".into(), None, None);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let config = Config::from_parts(
            "key".into(),
            Some("gemini-1.5-pro".into()),
            Some("http://localhost:8080/v1beta/".into()),
        );
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.api_base, "http://localhost:8080/v1beta");
    }

    #[test]
    fn test_blank_env_values_use_defaults() {
        let config = Config::from_parts("key".into(), Some("  ".into()), Some(String::new()));
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_with_model() {
        let config = Config::from_parts("key".into(), None, None);
        assert_eq!(config.clone().with_model(None).model, DEFAULT_MODEL);
        assert_eq!(config.with_model(Some("other".into())).model, "other");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = Config::from_parts("super-secret".into(), None, None);
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
