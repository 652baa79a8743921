//! Port interfaces for credential persistence
//!
//! A single owned store instance is injected into the request executor, the
//! refresh coordinator and the API facade. Nothing else touches persisted
//! credentials.

use async_trait::async_trait;
use pocketledger_domain::{CredentialBundle, Result, UserProfile};

/// Durable storage for the access token, refresh token and cached profile
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Current access token. Never fails: unavailable storage reads as `None`.
    async fn access_token(&self) -> Option<String>;

    /// Persist the access token.
    async fn set_access_token(&self, token: &str) -> Result<()>;

    /// Current refresh token. Never fails: unavailable storage reads as `None`.
    async fn refresh_token(&self) -> Option<String>;

    /// Persist the refresh token.
    async fn set_refresh_token(&self, token: &str) -> Result<()>;

    /// Cached user profile, if one was stored and still parses.
    async fn user(&self) -> Option<UserProfile>;

    /// Persist the user profile.
    async fn set_user(&self, profile: &UserProfile) -> Result<()>;

    /// Remove every slot. Reports failure unless all removals succeeded;
    /// clearing an empty store succeeds.
    async fn clear(&self) -> Result<()>;

    /// Replace the stored bundle.
    ///
    /// The default writes each present slot in turn and leaves absent slots
    /// untouched; implementations that can drop a stale refresh token should
    /// override it.
    async fn store_bundle(&self, bundle: &CredentialBundle) -> Result<()> {
        self.set_access_token(&bundle.access_token).await?;
        if let Some(refresh) = &bundle.refresh_token {
            self.set_refresh_token(refresh).await?;
        }
        if let Some(user) = &bundle.user {
            self.set_user(user).await?;
        }
        Ok(())
    }

    /// Read the whole bundle; `None` when no access token is stored.
    async fn load_bundle(&self) -> Option<CredentialBundle> {
        let access_token = self.access_token().await?;
        Some(CredentialBundle {
            access_token,
            refresh_token: self.refresh_token().await,
            user: self.user().await,
        })
    }
}
