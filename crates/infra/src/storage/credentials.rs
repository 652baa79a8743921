//! Credential store over a secret backend
//!
//! Three fixed slots: access token, refresh token and the cached user profile
//! (stored as JSON). Reads never fail; writes and clears do.

use async_trait::async_trait;
use pocketledger_core::CredentialStore;
use pocketledger_domain::constants::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_PROFILE_KEY};
use pocketledger_domain::{CredentialBundle, LedgerError, Result, UserProfile};
use tracing::{debug, info, warn};

use super::{KeychainError, KeychainProvider, SecretBackend};

const ALL_KEYS: [&str; 3] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_PROFILE_KEY];

/// [`CredentialStore`] implementation for any [`SecretBackend`]
#[derive(Debug, Clone)]
pub struct SecureCredentialStore<B> {
    backend: B,
}

impl SecureCredentialStore<KeychainProvider> {
    /// Store backed by the platform keychain under `service_name`.
    pub fn keychain(service_name: impl Into<String>) -> Self {
        Self::new(KeychainProvider::new(service_name))
    }
}

impl<B: SecretBackend> SecureCredentialStore<B> {
    /// Store over an arbitrary backend.
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Underlying backend.
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.backend.get_secret(key) {
            Ok(value) => Some(value),
            Err(KeychainError::NotFound) => None,
            Err(error) => {
                warn!(key, error = %error, "Credential read failed, treating slot as empty");
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.backend
            .set_secret(key, value)
            .map_err(|e| LedgerError::Storage(format!("Failed to persist {key}: {e}")))?;
        debug!(key, "Credential slot written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.backend
            .delete_secret(key)
            .map_err(|e| LedgerError::Storage(format!("Failed to remove {key}: {e}")))
    }
}

#[async_trait]
impl<B: SecretBackend> CredentialStore for SecureCredentialStore<B> {
    async fn access_token(&self) -> Option<String> {
        self.read(ACCESS_TOKEN_KEY)
    }

    async fn set_access_token(&self, token: &str) -> Result<()> {
        self.write(ACCESS_TOKEN_KEY, token)
    }

    async fn refresh_token(&self) -> Option<String> {
        self.read(REFRESH_TOKEN_KEY)
    }

    async fn set_refresh_token(&self, token: &str) -> Result<()> {
        self.write(REFRESH_TOKEN_KEY, token)
    }

    async fn user(&self) -> Option<UserProfile> {
        let raw = self.read(USER_PROFILE_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(error) => {
                warn!(error = %error, "Cached user profile is unreadable, ignoring it");
                None
            }
        }
    }

    async fn set_user(&self, profile: &UserProfile) -> Result<()> {
        let raw = serde_json::to_string(profile)?;
        self.write(USER_PROFILE_KEY, &raw)
    }

    async fn clear(&self) -> Result<()> {
        let failures: Vec<String> = ALL_KEYS
            .iter()
            .filter_map(|key| self.remove(key).err().map(|e| e.to_string()))
            .collect();

        if failures.is_empty() {
            info!("Credentials cleared");
            Ok(())
        } else {
            warn!(failed = failures.len(), "Credential clear incomplete");
            Err(LedgerError::Storage(format!(
                "Failed to clear credentials: {}",
                failures.join("; ")
            )))
        }
    }

    async fn store_bundle(&self, bundle: &CredentialBundle) -> Result<()> {
        self.write(ACCESS_TOKEN_KEY, &bundle.access_token)?;
        match &bundle.refresh_token {
            Some(refresh) => self.write(REFRESH_TOKEN_KEY, refresh)?,
            None => self.remove(REFRESH_TOKEN_KEY)?,
        }
        match &bundle.user {
            Some(user) => self.set_user(user).await?,
            None => self.remove(USER_PROFILE_KEY)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeychain;

    fn profile() -> UserProfile {
        UserProfile {
            id: "u1".into(),
            name: "Ann".into(),
            email: "a@b.com".into(),
            created_at: None,
        }
    }

    fn store() -> (SecureCredentialStore<MemoryKeychain>, MemoryKeychain) {
        let backend = MemoryKeychain::new();
        (SecureCredentialStore::new(backend.clone()), backend)
    }

    #[tokio::test]
    async fn slots_round_trip() {
        let (store, _) = store();

        store.set_access_token("T1").await.unwrap();
        store.set_refresh_token("R1").await.unwrap();
        store.set_user(&profile()).await.unwrap();

        assert_eq!(store.access_token().await.as_deref(), Some("T1"));
        assert_eq!(store.refresh_token().await.as_deref(), Some("R1"));
        assert_eq!(store.user().await, Some(profile()));
    }

    #[tokio::test]
    async fn reads_degrade_to_none_when_storage_unavailable() {
        let (store, backend) = store();
        store.set_access_token("T1").await.unwrap();

        backend.set_unavailable(true);
        assert_eq!(store.access_token().await, None);
        assert_eq!(store.user().await, None);
    }

    #[tokio::test]
    async fn writes_surface_storage_failures() {
        let (store, backend) = store();
        backend.set_unavailable(true);

        let result = store.set_access_token("T1").await;
        assert!(matches!(result, Err(LedgerError::Storage(_))));
    }

    #[tokio::test]
    async fn corrupt_user_reads_as_none() {
        let (store, backend) = store();
        backend.set_secret(USER_PROFILE_KEY, "{not json").unwrap();
        assert_eq!(store.user().await, None);
    }

    #[tokio::test]
    async fn clear_twice_leaves_store_empty() {
        let (store, backend) = store();
        store
            .store_bundle(&CredentialBundle {
                access_token: "T1".into(),
                refresh_token: Some("R1".into()),
                user: Some(profile()),
            })
            .await
            .unwrap();

        store.clear().await.unwrap();
        assert!(backend.is_empty());
        store.clear().await.unwrap();
        assert!(backend.is_empty());
        assert!(store.load_bundle().await.is_none());
    }

    #[tokio::test]
    async fn partial_clear_is_reported() {
        let (store, backend) = store();
        store.set_access_token("T1").await.unwrap();
        store.set_refresh_token("R1").await.unwrap();
        backend.fail_key(REFRESH_TOKEN_KEY);

        let result = store.clear().await;
        match result {
            Err(LedgerError::Storage(message)) => assert!(message.contains(REFRESH_TOKEN_KEY)),
            other => panic!("expected storage error, got {other:?}"),
        }
        // Remaining slots are still removed.
        assert_eq!(store.access_token().await, None);
    }

    #[tokio::test]
    async fn store_bundle_replaces_stale_refresh_token() {
        let (store, _) = store();
        store.set_refresh_token("old").await.unwrap();

        store
            .store_bundle(&CredentialBundle {
                access_token: "T2".into(),
                refresh_token: None,
                user: Some(profile()),
            })
            .await
            .unwrap();

        let bundle = store.load_bundle().await.unwrap();
        assert_eq!(bundle.access_token, "T2");
        assert_eq!(bundle.refresh_token, None);
        assert_eq!(bundle.user, Some(profile()));
    }
}
