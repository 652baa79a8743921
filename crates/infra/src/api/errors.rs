//! API error contract
//!
//! Every failure path (transport, non-2xx status, malformed body, storage)
//! ends up as exactly one [`ApiError`] whose `Display` is the single
//! human-readable message UI code shows verbatim.

use pocketledger_domain::LedgerError;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Categories of API errors, for callers that branch on kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// 401 / 403
    Authentication,
    /// 400 / 422
    Validation,
    /// 404
    NotFound,
    /// Other 4xx and unencodable requests
    Client,
    /// 5xx
    Server,
    /// No response received
    Network,
    /// 2xx body that does not match the expected shape
    Deserialization,
    /// Credential persistence failed
    Storage,
    /// Client could not be constructed
    Config,
}

/// Normalized API error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Non-2xx response
    #[error("{message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Normalized server message
        message: String,
    },

    /// No response received (DNS, refused connection, timeout)
    #[error("{0}")]
    Transport(String),

    /// Success response whose body does not match the operation's schema
    #[error("{message}")]
    Deserialization { message: String },

    /// Request body could not be serialized
    #[error("{0}")]
    Encoding(String),

    /// Credential persistence failed
    #[error("{0}")]
    Storage(String),

    /// Client could not be constructed
    #[error("{0}")]
    Config(String),
}

impl ApiError {
    /// Error for a non-2xx response, normalizing its parsed body.
    #[must_use]
    pub fn from_response(status: StatusCode, body: &Value) -> Self {
        Self::Status { status: status.as_u16(), message: normalize_error_body(status, body) }
    }

    /// The normalized human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Status { message, .. } | Self::Deserialization { message } => message,
            Self::Transport(message)
            | Self::Encoding(message)
            | Self::Storage(message)
            | Self::Config(message) => message,
        }
    }

    /// HTTP status, when a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server rejected the credentials (HTTP 401).
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }

    /// Get the error category for this error
    #[must_use]
    pub const fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Status { status, .. } => match *status {
                401 | 403 => ApiErrorCategory::Authentication,
                400 | 422 => ApiErrorCategory::Validation,
                404 => ApiErrorCategory::NotFound,
                500..=599 => ApiErrorCategory::Server,
                _ => ApiErrorCategory::Client,
            },
            Self::Transport(_) => ApiErrorCategory::Network,
            Self::Deserialization { .. } => ApiErrorCategory::Deserialization,
            Self::Encoding(_) => ApiErrorCategory::Client,
            Self::Storage(_) => ApiErrorCategory::Storage,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Config(message) => Self::Config(message),
            LedgerError::Storage(message) => Self::Storage(message),
            other => Self::Storage(other.to_string()),
        }
    }
}

/// Collapse a server error body into one message.
///
/// Accepted shapes, in order: a bare string; `message` as a string; `message`
/// as an array of strings or validation-constraint objects (flattened in
/// input order, newline-joined); `error` as a string. Anything else yields a
/// generic status message.
#[must_use]
pub fn normalize_error_body(status: StatusCode, body: &Value) -> String {
    let normalized = match body {
        Value::String(text) => non_empty(text),
        Value::Object(map) => map
            .get("message")
            .and_then(message_field)
            .or_else(|| map.get("error").and_then(Value::as_str).and_then(non_empty)),
        _ => None,
    };

    normalized.unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
}

fn message_field(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => non_empty(text),
        Value::Array(items) => {
            let lines: Vec<String> = items.iter().flat_map(constraint_messages).collect();
            if lines.is_empty() {
                None
            } else {
                Some(lines.join("\n"))
            }
        }
        _ => None,
    }
}

fn constraint_messages(item: &Value) -> Vec<String> {
    match item {
        Value::String(text) => vec![text.clone()],
        Value::Object(map) => {
            if let Some(Value::Object(constraints)) = map.get("constraints") {
                constraints.values().filter_map(Value::as_str).map(str::to_string).collect()
            } else {
                map.get("message").and_then(Value::as_str).map(str::to_string).into_iter().collect()
            }
        }
        _ => Vec::new(),
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
