//! Client configuration structures

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_APP_ID, DEFAULT_KEYCHAIN_SERVICE, DEFAULT_REQUEST_TIMEOUT_SECS, DEV_ANDROID_BASE_URL,
    DEV_BASE_URL, RELEASE_BASE_URL,
};

/// Configuration for the authenticated API client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL every endpoint is appended to (no trailing slash)
    pub base_url: String,
    /// Value of the fixed application identifier header
    pub app_id: String,
    /// Per-request timeout; `None` leaves the transport default in place
    pub request_timeout_secs: Option<u64>,
    /// Keychain service name the credential slots are stored under
    pub keychain_service: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url().to_string(),
            app_id: DEFAULT_APP_ID.to_string(),
            request_timeout_secs: Some(DEFAULT_REQUEST_TIMEOUT_SECS),
            keychain_service: DEFAULT_KEYCHAIN_SERVICE.to_string(),
        }
    }
}

/// Base URL selected by build mode and target platform.
#[must_use]
pub const fn default_base_url() -> &'static str {
    if cfg!(not(debug_assertions)) {
        RELEASE_BASE_URL
    } else if cfg!(target_os = "android") {
        DEV_ANDROID_BASE_URL
    } else {
        DEV_BASE_URL
    }
}
