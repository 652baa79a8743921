//! API client facade
//!
//! Owns the request executor, the refresh coordinator and the injected
//! credential store. Domain operations live in [`super::commands`] as
//! further `impl ApiClient` blocks and all go through [`ApiClient::send`].

use std::sync::Arc;

use parking_lot::RwLock;
use pocketledger_core::CredentialStore;
use pocketledger_domain::{AuthState, ClientConfig, UserProfile};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::errors::ApiError;
use super::executor::RequestExecutor;
use super::refresh::RefreshCoordinator;
use super::request::ApiRequest;
use crate::config;
use crate::storage::SecureCredentialStore;

/// Authenticated client for the ledger backend
pub struct ApiClient {
    executor: Arc<RequestExecutor>,
    store: Arc<dyn CredentialStore>,
    refresher: RefreshCoordinator,
    state: RwLock<AuthState>,
}

impl ApiClient {
    /// Create a client over an injected credential store.
    ///
    /// The auth state starts as `LoggedOut`; call
    /// [`ApiClient::restore_session`] to derive it from stored credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, store: Arc<dyn CredentialStore>) -> Result<Self, ApiError> {
        let executor = Arc::new(RequestExecutor::new(config)?);
        let refresher = RefreshCoordinator::new(Arc::clone(&store), Arc::clone(&executor));
        debug!(base_url = %executor.base_url(), "API client created");
        Ok(Self { executor, store, refresher, state: RwLock::new(AuthState::LoggedOut) })
    }

    /// Create a client persisting credentials in the platform keychain.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the HTTP client cannot be built.
    pub fn with_keychain(config: &ClientConfig) -> Result<Self, ApiError> {
        let store = Arc::new(SecureCredentialStore::keychain(config.keychain_service.clone()));
        Self::new(config, store)
    }

    /// Create a keychain-backed client from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if configuration is invalid.
    pub fn from_env() -> Result<Self, ApiError> {
        let config = config::load()?;
        Self::with_keychain(&config)
    }

    /// The credential store this client reads and writes.
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        self.executor.base_url()
    }

    /// Current authentication state.
    pub fn auth_state(&self) -> AuthState {
        *self.state.read()
    }

    /// Derive the auth state from persisted credentials, e.g. at app start.
    ///
    /// Returns the cached profile when an access token is stored.
    pub async fn restore_session(&self) -> Option<UserProfile> {
        let bundle = self.store.load_bundle().await;
        self.set_state(AuthState::from_tokens(bundle.is_some()));
        debug!(logged_in = bundle.is_some(), "Session restored");
        bundle.and_then(|b| b.user)
    }

    /// Cached profile without a network round trip.
    pub async fn current_user(&self) -> Option<UserProfile> {
        self.store.user().await
    }

    pub(crate) fn set_state(&self, next: AuthState) {
        let mut state = self.state.write();
        let previous = *state;
        if previous != next {
            *state = next;
            info!(from = ?previous, to = ?next, "Auth state changed");
        }
    }

    /// Perform an authorized request with at most one refresh-and-retry.
    ///
    /// A 401 on the first attempt runs (or joins) a refresh and re-issues the
    /// request once with the new token. If the refresh fails the first
    /// attempt's error is returned.
    pub(crate) async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let token = self.store.access_token().await;

        match self.executor.execute(&request, token.as_deref()).await {
            Err(err) if err.is_unauthorized() => self.recover(&request, token, err).await,
            other => other,
        }
    }

    /// Perform a request without the refresh path. A stored token is still
    /// attached.
    pub(crate) async fn send_once<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ApiError> {
        let token = self.store.access_token().await;
        self.executor.execute(&request, token.as_deref()).await
    }

    async fn recover<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        used: Option<String>,
        original: ApiError,
    ) -> Result<T, ApiError> {
        // Another call may have refreshed while this one was in flight.
        let current = self.store.access_token().await;
        if current.is_some() && current != used && !self.refresher.is_refreshing() {
            debug!(endpoint = request.endpoint(), "Retrying with newer stored token");
            return self.executor.execute(request, current.as_deref()).await;
        }

        self.set_state(AuthState::Expired);

        match self.refresher.refresh().await {
            Ok(token) => {
                self.set_state(AuthState::LoggedIn);
                debug!(endpoint = request.endpoint(), "Retrying after refresh");
                self.executor.execute(request, Some(token.as_str())).await
            }
            Err(failure) => {
                warn!(endpoint = request.endpoint(), reason = %failure, "Refresh failed, keeping original error");
                self.set_state(AuthState::LoggedOut);
                Err(original)
            }
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, endpoint: impl Into<String>) -> Result<T, ApiError> {
        self.send(ApiRequest::get(endpoint)).await
    }

    pub(crate) async fn get_query<T: DeserializeOwned>(
        &self,
        endpoint: impl Into<String>,
        query: Vec<(String, String)>,
    ) -> Result<T, ApiError> {
        self.send(ApiRequest::get(endpoint).query(query)).await
    }

    pub(crate) async fn post<B, T>(&self, endpoint: impl Into<String>, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(ApiRequest::post(endpoint).json(body)?).await
    }

    pub(crate) async fn put<B, T>(&self, endpoint: impl Into<String>, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(ApiRequest::put(endpoint).json(body)?).await
    }

    pub(crate) async fn patch<B, T>(&self, endpoint: impl Into<String>, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(ApiRequest::patch(endpoint).json(body)?).await
    }

    /// DELETE whose response body is ignored.
    pub(crate) async fn delete(&self, endpoint: impl Into<String>) -> Result<(), ApiError> {
        let _: serde::de::IgnoredAny = self.send(ApiRequest::delete(endpoint)).await?;
        Ok(())
    }
}

/// Encode a path segment.
pub(crate) fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeychain;

    fn client() -> ApiClient {
        let store = Arc::new(SecureCredentialStore::new(MemoryKeychain::new()));
        ApiClient::new(&ClientConfig::default(), store).unwrap()
    }

    #[test]
    fn segment_escapes_reserved_characters() {
        assert_eq!(segment("abc-123"), "abc-123");
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
    }

    #[tokio::test]
    async fn restore_session_follows_stored_token() {
        let client = client();
        assert_eq!(client.restore_session().await, None);
        assert_eq!(client.auth_state(), AuthState::LoggedOut);

        client.store().set_access_token("T1").await.unwrap();
        client.restore_session().await;
        assert_eq!(client.auth_state(), AuthState::LoggedIn);
    }
}
