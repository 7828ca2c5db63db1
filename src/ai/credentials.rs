use crate::error::AnalyzerError;
use keyring::credential::{CredentialBuilderApi, CredentialPersistence};
use keyring::Entry;

/// Environment variable holding the Gemini API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

const SERVICE_NAME: &str = "com.legal-summarizer.cli";
const PROVIDER: &str = "gemini";

/// Where the API key was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    Keyring,
}

/// Credential manager: environment (and `.env`) first, OS keyring second
pub struct CredentialManager;

impl CredentialManager {
    /// Resolve the API key, or fail with [`AnalyzerError::Configuration`].
    pub fn get_api_key() -> Result<(String, CredentialSource), AnalyzerError> {
        if let Some(key) = non_empty(std::env::var(API_KEY_ENV).ok()) {
            tracing::debug!("[Credentials] Using API key from {}", API_KEY_ENV);
            return Ok((key, CredentialSource::Environment));
        }

        if let Ok(entry) = Entry::new(SERVICE_NAME, PROVIDER) {
            match entry.get_password() {
                Ok(password) => {
                    if let Some(key) = non_empty(Some(password)) {
                        tracing::debug!("[Credentials] Retrieved API key from keychain");
                        return Ok((key, CredentialSource::Keyring));
                    }
                }
                Err(keyring::Error::NoEntry) => {}
                Err(e) => tracing::debug!("[Credentials] Keychain unavailable: {}", e),
            }
        }

        Err(AnalyzerError::Configuration(API_KEY_ENV.to_string()))
    }

    /// Store an API key in the OS keyring.
    ///
    /// The key is read back through a fresh entry so a store that accepts
    /// writes but keeps nothing is reported as a failure.
    pub fn store_api_key(api_key: &str) -> Result<(), AnalyzerError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(AnalyzerError::Credential("API key is empty".to_string()));
        }
        if !Self::keyring_is_persistent() {
            return Err(AnalyzerError::Credential(format!(
                "No persistent keyring available on this system. Set {} instead.",
                API_KEY_ENV
            )));
        }

        let entry = Entry::new(SERVICE_NAME, PROVIDER)
            .map_err(|e| AnalyzerError::Credential(format!("Keychain unavailable: {}", e)))?;
        entry
            .set_password(api_key)
            .map_err(|e| AnalyzerError::Credential(format!("Failed to store API key: {}", e)))?;

        if Self::stored_api_key()?.as_deref() != Some(api_key) {
            return Err(AnalyzerError::Credential(format!(
                "Keychain did not keep the API key. Set {} instead.",
                API_KEY_ENV
            )));
        }

        tracing::info!("[Credentials] Stored API key in keychain");
        Ok(())
    }

    /// Read the key from the keyring only, ignoring the environment
    pub fn stored_api_key() -> Result<Option<String>, AnalyzerError> {
        let entry = Entry::new(SERVICE_NAME, PROVIDER)
            .map_err(|e| AnalyzerError::Credential(format!("Keychain unavailable: {}", e)))?;

        match entry.get_password() {
            Ok(password) => Ok(non_empty(Some(password))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(AnalyzerError::Credential(format!(
                "Failed to read API key: {}",
                e
            ))),
        }
    }

    /// How long a key written to the platform's default store survives
    pub fn keyring_persistence() -> CredentialPersistence {
        keyring::default::default_credential_builder().persistence()
    }

    /// False when only keyring's in-memory mock store is compiled in
    pub fn keyring_is_persistent() -> bool {
        is_persistent(&Self::keyring_persistence())
    }

    /// Delete the stored API key. Deleting a missing key is not an error.
    pub fn delete_api_key() -> Result<(), AnalyzerError> {
        let entry = Entry::new(SERVICE_NAME, PROVIDER)
            .map_err(|e| AnalyzerError::Credential(format!("Keychain unavailable: {}", e)))?;

        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => {
                tracing::info!("[Credentials] Deleted API key from keychain");
                Ok(())
            }
            Err(e) => Err(AnalyzerError::Credential(format!(
                "Failed to delete API key: {}",
                e
            ))),
        }
    }

    /// Check whether an API key is configured, and where
    pub fn api_key_source() -> Option<CredentialSource> {
        Self::get_api_key().ok().map(|(_, source)| source)
    }
}

fn is_persistent(persistence: &CredentialPersistence) -> bool {
    matches!(
        persistence,
        CredentialPersistence::UntilReboot | CredentialPersistence::UntilDelete
    )
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_trims() {
        assert_eq!(non_empty(Some("  abc \n".into())), Some("abc".into()));
    }

    #[test]
    fn test_blank_values_are_missing() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("   ".into())), None);
    }

    #[test]
    fn test_store_rejects_empty_key() {
        assert!(matches!(
            CredentialManager::store_api_key("  "),
            Err(AnalyzerError::Credential(_))
        ));
    }

    #[test]
    fn test_memory_only_stores_are_not_persistent() {
        assert!(!is_persistent(&CredentialPersistence::EntryOnly));
        assert!(!is_persistent(&CredentialPersistence::ProcessOnly));
        assert!(is_persistent(&CredentialPersistence::UntilReboot));
        assert!(is_persistent(&CredentialPersistence::UntilDelete));
    }

    #[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
    #[test]
    fn test_platform_store_is_compiled_in() {
        assert!(CredentialManager::keyring_is_persistent());
    }

    #[test]
    #[ignore = "needs an unlocked OS keyring"]
    fn test_store_then_read_from_keyring() {
        CredentialManager::store_api_key("  round-trip-key-123 ").unwrap();

        // A fresh entry must see the earlier write
        assert_eq!(
            CredentialManager::stored_api_key().unwrap().as_deref(),
            Some("round-trip-key-123")
        );

        CredentialManager::delete_api_key().unwrap();
        assert_eq!(CredentialManager::stored_api_key().unwrap(), None);
    }
}
