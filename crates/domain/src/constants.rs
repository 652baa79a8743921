//! Client constants
//!
//! Fixed storage keys, header names and defaults shared by the client crates.

// Credential storage slots
pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USER_PROFILE_KEY: &str = "user";

// Request headers
pub const APP_ID_HEADER: &str = "X-App-Id";
pub const DEFAULT_APP_ID: &str = "pocketledger-mobile";

// Defaults
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "pocketledger.credentials";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const RELEASE_BASE_URL: &str = "https://api.pocketledger.app/api";
pub const DEV_BASE_URL: &str = "http://localhost:3000/api";
/// Android emulators reach the host loopback through this alias.
pub const DEV_ANDROID_BASE_URL: &str = "http://10.0.2.2:3000/api";

// Auth endpoints
pub const REFRESH_ENDPOINT: &str = "/auth/refresh";
