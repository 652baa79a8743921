//! Platform keychain backend
//!
//! Thin wrapper over the platform keychain (macOS/iOS Keychain, Windows
//! Credential Manager, Linux Secret Service) via `keyring`. All credential
//! slots live under one service name.
//!
//! ```no_run
//! use pocketledger_infra::storage::{KeychainProvider, SecretBackend};
//!
//! let keychain = KeychainProvider::new("pocketledger.credentials");
//! keychain.set_secret("access_token", "opaque")?;
//! assert_eq!(keychain.get_secret("access_token")?, "opaque");
//! # Ok::<(), pocketledger_infra::storage::KeychainError>(())
//! ```

use keyring::Entry;
use pocketledger_domain::LedgerError;
use thiserror::Error;
use tracing::debug;

use super::SecretBackend;

/// Keychain-backed secret storage for one service name
#[derive(Debug, Clone)]
pub struct KeychainProvider {
    service_name: String,
}

impl KeychainProvider {
    /// Provider storing every slot under `service_name`.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    fn create_entry(&self, key: &str) -> Result<Entry, KeychainError> {
        Entry::new(&self.service_name, key).map_err(|e| {
            KeychainError::AccessFailed(format!("Failed to create keychain entry: {e}"))
        })
    }
}

impl SecretBackend for KeychainProvider {
    fn get_secret(&self, key: &str) -> Result<String, KeychainError> {
        debug!(service = %self.service_name, key = %key, "Retrieving secret from keychain");

        let entry = self.create_entry(key)?;
        entry.get_password().map_err(|e| {
            if matches!(e, keyring::Error::NoEntry) {
                KeychainError::NotFound
            } else {
                KeychainError::AccessFailed(format!("Failed to retrieve secret for {key}: {e}"))
            }
        })
    }

    fn set_secret(&self, key: &str, value: &str) -> Result<(), KeychainError> {
        debug!(service = %self.service_name, key = %key, "Storing secret in keychain");

        let entry = self.create_entry(key)?;
        entry.set_password(value).map_err(|e| {
            KeychainError::AccessFailed(format!("Failed to store secret for {key}: {e}"))
        })
    }

    fn delete_secret(&self, key: &str) -> Result<(), KeychainError> {
        debug!(service = %self.service_name, key = %key, "Deleting secret from keychain");

        let entry = self.create_entry(key)?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(KeychainError::AccessFailed(format!(
                "Failed to delete secret for {key}: {e}"
            ))),
        }
    }
}

/// Keychain error types
#[derive(Debug, Error)]
pub enum KeychainError {
    /// Keychain access failed (permission denied, not available, etc.)
    #[error("Keychain access failed: {0}")]
    AccessFailed(String),

    /// Entry not found in keychain
    #[error("Entry not found")]
    NotFound,
}

impl From<KeychainError> for LedgerError {
    fn from(err: KeychainError) -> Self {
        match err {
            KeychainError::NotFound => Self::NotFound(err.to_string()),
            other => Self::Storage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_keeps_service_name() {
        let keychain = KeychainProvider::new("pocketledger.test");
        assert_eq!(keychain.service_name(), "pocketledger.test");
    }

    #[test]
    fn not_found_maps_to_domain_not_found() {
        let err: LedgerError = KeychainError::NotFound.into();
        assert!(matches!(err, LedgerError::NotFound(_)));

        let err: LedgerError = KeychainError::AccessFailed("locked".into()).into();
        assert_eq!(err, LedgerError::Storage("Keychain access failed: locked".into()));
    }
}
