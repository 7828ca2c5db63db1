use clap::Subcommand;
use keyring::credential::CredentialPersistence;

use crate::ai::credentials::{CredentialManager, CredentialSource, API_KEY_ENV};
use crate::error::AnalyzerError;

#[derive(Debug, Subcommand)]
pub enum KeyCommand {
    /// Store the API key in the OS keyring
    Set {
        /// Gemini API key
        api_key: String,
    },
    /// Remove the stored API key
    Delete,
    /// Show whether an API key is configured
    Status,
}

pub fn execute(cmd: KeyCommand) -> Result<(), AnalyzerError> {
    match cmd {
        KeyCommand::Set { api_key } => {
            CredentialManager::store_api_key(&api_key)?;
            println!("API key stored.");
        }
        KeyCommand::Delete => {
            CredentialManager::delete_api_key()?;
            println!("API key deleted.");
        }
        KeyCommand::Status => {
            match CredentialManager::api_key_source() {
                Some(CredentialSource::Environment) => println!("API key configured ({}).", API_KEY_ENV),
                Some(CredentialSource::Keyring) => println!("API key configured (keyring)."),
                None => println!("No API key configured. Set {} or run `key set`.", API_KEY_ENV),
            }
            println!("{}", keyring_status(&CredentialManager::keyring_persistence()));
        }
    }
    Ok(())
}

fn keyring_status(persistence: &CredentialPersistence) -> String {
    match persistence {
        CredentialPersistence::UntilDelete => "Keyring: persistent.".to_string(),
        CredentialPersistence::UntilReboot => "Keyring: kept until the next reboot.".to_string(),
        _ => format!(
            "Keyring: no persistent backend available; `key set` cannot store a key. Use {}.",
            API_KEY_ENV
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyring_status_warns_without_backend() {
        let status = keyring_status(&CredentialPersistence::EntryOnly);
        assert!(status.contains("no persistent backend"));
        assert!(status.contains(API_KEY_ENV));

        let status = keyring_status(&CredentialPersistence::ProcessOnly);
        assert!(status.contains("no persistent backend"));
    }

    #[test]
    fn test_keyring_status_for_platform_stores() {
        assert_eq!(
            keyring_status(&CredentialPersistence::UntilDelete),
            "Keyring: persistent."
        );
        assert!(keyring_status(&CredentialPersistence::UntilReboot).contains("reboot"));
    }
}
