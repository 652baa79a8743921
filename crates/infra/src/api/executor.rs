//! Request executor
//!
//! Performs exactly one HTTP exchange and classifies the outcome:
//! 2xx bodies are decoded into the caller's type, everything else becomes a
//! normalized [`ApiError`].

use std::time::Duration;

use pocketledger_domain::constants::APP_ID_HEADER;
use pocketledger_domain::ClientConfig;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};

use super::errors::ApiError;
use super::request::ApiRequest;
use crate::http::{transport_diagnostic, HttpClient};

/// Executes single requests against the configured base URL
#[derive(Clone)]
pub struct RequestExecutor {
    http: HttpClient,
    base_url: String,
}

impl RequestExecutor {
    /// Build an executor from client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the app identifier is not a valid
    /// header value or the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = HttpClient::builder()
            .timeout(config.request_timeout_secs.map(Duration::from_secs))
            .user_agent(concat!("pocketledger/", env!("CARGO_PKG_VERSION")))
            .default_header(APP_ID_HEADER, &config.app_id)?
            .build()?;

        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform the request and decode a 2xx body into `T`.
    ///
    /// Empty bodies (204, 205) decode from JSON `null`, so `()`,
    /// `Option<_>` and `IgnoredAny` all succeed on them.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Status`] for non-2xx responses
    /// - [`ApiError::Transport`] when no response was received
    /// - [`ApiError::Deserialization`] when a 2xx body does not match `T`
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let value = self.execute_value(request, token).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Deserialization {
            message: format!("Unexpected response from {}: {e}", request.endpoint()),
        })
    }

    /// Perform the request and return the parsed 2xx body untyped.
    ///
    /// # Errors
    ///
    /// Same as [`RequestExecutor::execute`], minus typed decoding.
    #[instrument(
        skip(self, request, token),
        fields(method = %request.method(), endpoint = %request.endpoint(), authorized = token.is_some())
    )]
    pub async fn execute_value(
        &self,
        request: &ApiRequest,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, request.endpoint());

        let mut builder = self.http.request(request.method().clone(), &url);
        if !request.query_pairs().is_empty() {
            builder = builder.query(request.query_pairs());
        }
        if let Some(body) = request.body() {
            let bytes = serde_json::to_vec(body)
                .map_err(|e| ApiError::Encoding(format!("Failed to encode request body: {e}")))?;
            builder = builder.header(CONTENT_TYPE, "application/json").body(bytes);
        }
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = self
            .http
            .send(builder)
            .await
            .map_err(|e| ApiError::Transport(transport_diagnostic(&self.base_url, &e)))?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("json"));

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(transport_diagnostic(&self.base_url, &e)))?;

        let body = parse_body(&text, is_json);

        if status.is_success() {
            debug!(status = status.as_u16(), "Request succeeded");
            return body.map_err(|e| ApiError::Deserialization {
                message: format!("Malformed JSON response from {}: {e}", request.endpoint()),
            });
        }

        let body = body.unwrap_or_else(|_| fallback_body(&text));
        let error = ApiError::from_response(status, &body);
        log_failure(status, &error);
        Err(error)
    }
}

/// Parse a response body.
///
/// Declared JSON must parse; anything else is parsed best-effort and falls
/// back to `{ "message": <raw text> }` so plain-text bodies (gateway errors)
/// never fail the exchange on their own.
fn parse_body(text: &str, declared_json: bool) -> Result<Value, serde_json::Error> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(e) if declared_json => Err(e),
        Err(_) => Ok(fallback_body(text)),
    }
}

fn fallback_body(text: &str) -> Value {
    json!({ "message": text })
}

fn log_failure(status: StatusCode, error: &ApiError) {
    if status.is_server_error() {
        warn!(status = status.as_u16(), error = %error, "Request failed");
    } else {
        debug!(status = status.as_u16(), error = %error, "Request rejected");
    }
}
