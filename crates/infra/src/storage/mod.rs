//! Credential persistence
//!
//! - [`SecretBackend`]: generic string secret storage
//! - [`KeychainProvider`]: platform keychain backend (`keyring`)
//! - [`MemoryKeychain`]: process-local backend
//! - [`SecureCredentialStore`]: the [`CredentialStore`] port on top of any
//!   backend
//!
//! [`CredentialStore`]: pocketledger_core::CredentialStore

pub mod credentials;
pub mod keychain;
pub mod memory;

pub use credentials::SecureCredentialStore;
pub use keychain::{KeychainError, KeychainProvider};
pub use memory::MemoryKeychain;

/// Synchronous key/value secret storage
///
/// Each call touches one key; backends serialize individual writes but offer
/// no cross-key transaction.
pub trait SecretBackend: Send + Sync {
    /// Read a secret. Missing keys yield [`KeychainError::NotFound`].
    fn get_secret(&self, key: &str) -> Result<String, KeychainError>;

    /// Create or overwrite a secret.
    fn set_secret(&self, key: &str, value: &str) -> Result<(), KeychainError>;

    /// Remove a secret. Removing a missing key succeeds.
    fn delete_secret(&self, key: &str) -> Result<(), KeychainError>;
}
