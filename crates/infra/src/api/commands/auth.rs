//! Registration, login and logout

use pocketledger_domain::{AuthResponse, AuthState, LoginRequest, RegisterRequest};
use tracing::{info, instrument, warn};

use crate::api::{ApiClient, ApiError, ApiRequest};

impl ApiClient {
    /// Create an account and start a session with it.
    ///
    /// The returned bundle is persisted before this resolves.
    ///
    /// # Errors
    ///
    /// Returns the normalized server error, or [`ApiError::Storage`] if the
    /// credentials could not be persisted.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse =
            self.send_once(ApiRequest::post("/auth/register").json(request)?).await?;
        self.persist_session(&response).await?;
        info!(user_id = %response.user.id, "Registered");
        Ok(response)
    }

    /// Log in and persist the returned credentials.
    ///
    /// # Errors
    ///
    /// Returns the normalized server error (a wrong password is a plain 401
    /// and does not trigger a refresh), or [`ApiError::Storage`] if the
    /// credentials could not be persisted.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse =
            self.send_once(ApiRequest::post("/auth/login").json(request)?).await?;
        self.persist_session(&response).await?;
        info!(user_id = %response.user.id, "Logged in");
        Ok(response)
    }

    /// End the session.
    ///
    /// The server is notified best-effort; local credentials are cleared
    /// regardless of its answer.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] if the credential store could not be
    /// fully cleared; the auth state is left unchanged in that case.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApiError> {
        if self.store().access_token().await.is_some() {
            let notified: Result<serde::de::IgnoredAny, ApiError> =
                self.send_once(ApiRequest::post("/auth/logout")).await;
            if let Err(e) = notified {
                warn!(error = %e, "Server logout failed, clearing local session anyway");
            }
        }

        // Tokens that survive a failed clear still authorize requests.
        self.store().clear().await?;
        self.set_state(AuthState::LoggedOut);
        info!("Logged out");
        Ok(())
    }

    async fn persist_session(&self, response: &AuthResponse) -> Result<(), ApiError> {
        self.store().store_bundle(&response.bundle()).await?;
        self.set_state(AuthState::LoggedIn);
        Ok(())
    }
}
