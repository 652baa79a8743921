//! Single-flight access-token refresh
//!
//! Any number of concurrent callers that hit a 401 join the same refresh
//! exchange. The slot is emptied once that exchange settles, so the next
//! expiry starts a fresh one.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use pocketledger_core::CredentialStore;
use pocketledger_domain::constants::REFRESH_ENDPOINT;
use pocketledger_domain::RefreshResponse;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::executor::RequestExecutor;
use super::request::ApiRequest;
use super::ApiError;

/// Why a refresh produced no new access token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshFailure {
    /// Nothing to exchange; the session cannot be renewed
    #[error("No refresh token stored")]
    MissingRefreshToken,

    /// The refresh endpoint did not hand out a new token
    #[error("Refresh rejected: {0}")]
    Rejected(ApiError),

    /// The new token could not be persisted
    #[error("Failed to persist refreshed token: {0}")]
    Storage(String),
}

type RefreshFuture = Shared<BoxFuture<'static, Result<String, RefreshFailure>>>;

/// Coordinates refreshes so at most one is in flight
pub struct RefreshCoordinator {
    store: Arc<dyn CredentialStore>,
    executor: Arc<RequestExecutor>,
    in_flight: Mutex<Option<RefreshFuture>>,
}

impl RefreshCoordinator {
    /// Coordinator writing refreshed tokens into `store`.
    pub fn new(store: Arc<dyn CredentialStore>, executor: Arc<RequestExecutor>) -> Self {
        Self { store, executor, in_flight: Mutex::new(None) }
    }

    /// Whether a refresh exchange is currently outstanding.
    pub fn is_refreshing(&self) -> bool {
        self.in_flight.lock().is_some()
    }

    /// Obtain a new access token, joining the in-flight refresh if any.
    ///
    /// # Errors
    ///
    /// Returns a [`RefreshFailure`] when no refresh token is stored, the
    /// server rejects it, or the new token cannot be persisted. Every
    /// joined caller observes the same outcome.
    pub async fn refresh(&self) -> Result<String, RefreshFailure> {
        let future = {
            let mut slot = self.in_flight.lock();
            if let Some(existing) = slot.as_ref() {
                debug!("Joining in-flight token refresh");
                existing.clone()
            } else {
                let future = Self::run(Arc::clone(&self.store), Arc::clone(&self.executor))
                    .boxed()
                    .shared();
                *slot = Some(future.clone());
                future
            }
        };

        let outcome = future.clone().await;

        let mut slot = self.in_flight.lock();
        if slot.as_ref().is_some_and(|current| current.ptr_eq(&future)) {
            *slot = None;
        }

        outcome
    }

    async fn run(
        store: Arc<dyn CredentialStore>,
        executor: Arc<RequestExecutor>,
    ) -> Result<String, RefreshFailure> {
        let Some(refresh_token) = store.refresh_token().await else {
            info!("Access token expired and no refresh token is stored");
            return Err(RefreshFailure::MissingRefreshToken);
        };

        let response: RefreshResponse = executor
            .execute(&ApiRequest::post(REFRESH_ENDPOINT), Some(refresh_token.as_str()))
            .await
            .map_err(|e| {
                warn!(error = %e, "Token refresh rejected");
                RefreshFailure::Rejected(e)
            })?;

        // Rotated refresh token first: a new access token must never sit
        // next to a refresh token the server has already retired.
        if let Some(rotated) = response.refresh_token.as_deref() {
            store
                .set_refresh_token(rotated)
                .await
                .map_err(|e| RefreshFailure::Storage(e.to_string()))?;
        }

        store
            .set_access_token(&response.token)
            .await
            .map_err(|e| RefreshFailure::Storage(e.to_string()))?;

        info!(rotated = response.refresh_token.is_some(), "Access token refreshed");
        Ok(response.token)
    }
}
