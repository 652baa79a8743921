//! App-lock PIN
//!
//! The PIN itself is never logged.

use pocketledger_domain::{MessageResponse, PinRequest, PinStatus, PinVerification};
use tracing::{info, instrument};

use crate::api::{ApiClient, ApiError};

impl ApiClient {
    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self))]
    pub async fn pin_status(&self) -> Result<PinStatus, ApiError> {
        self.get("/users/pin/status").await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip_all)]
    pub async fn set_pin(&self, pin: &str) -> Result<MessageResponse, ApiError> {
        let response: Option<MessageResponse> =
            self.post("/users/pin", &PinRequest { pin: pin.to_string() }).await?;
        info!("PIN set");
        Ok(response.unwrap_or_default())
    }

    /// Check a PIN. A wrong PIN is `valid: false`, not an error.
    ///
    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip_all)]
    pub async fn verify_pin(&self, pin: &str) -> Result<PinVerification, ApiError> {
        self.post("/users/pin/verify", &PinRequest { pin: pin.to_string() }).await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self))]
    pub async fn remove_pin(&self) -> Result<(), ApiError> {
        self.delete("/users/pin").await
    }
}
