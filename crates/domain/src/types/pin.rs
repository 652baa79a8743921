//! PIN lock types

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinStatus {
    #[serde(alias = "enabled", alias = "isSet")]
    pub has_pin: bool,
}

/// Body for both setting and verifying a PIN
#[derive(Clone, Serialize)]
pub struct PinRequest {
    pub pin: String,
}

impl fmt::Debug for PinRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PinRequest { pin: <redacted> }")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinVerification {
    #[serde(alias = "isValid", alias = "success")]
    pub valid: bool,
}
