use pocketledger_domain::{ChangePasswordRequest, MessageResponse, UpdateProfileRequest, UserProfile};
use tracing::{debug, instrument, warn};

use crate::api::{ApiClient, ApiError};

impl ApiClient {
    /// Fetch the profile from the server and refresh the cached copy.
    ///
    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self))]
    pub async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        let profile: UserProfile = self.get("/users/me").await?;
        self.cache_profile(&profile).await;
        Ok(profile)
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self, request))]
    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<UserProfile, ApiError> {
        let profile: UserProfile = self.patch("/users/me", request).await?;
        self.cache_profile(&profile).await;
        Ok(profile)
    }

    /// # Errors
    ///
    /// Returns the normalized server error; a wrong current password
    /// typically arrives as a 400.
    #[instrument(skip(self, request))]
    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<MessageResponse, ApiError> {
        let response: Option<MessageResponse> = self.patch("/users/me/password", request).await?;
        Ok(response.unwrap_or_default())
    }

    // The server copy is authoritative; a stale cache is acceptable.
    async fn cache_profile(&self, profile: &UserProfile) {
        match self.store().set_user(profile).await {
            Ok(()) => debug!(user_id = %profile.id, "Cached profile updated"),
            Err(e) => warn!(error = %e, "Failed to cache profile"),
        }
    }
}
