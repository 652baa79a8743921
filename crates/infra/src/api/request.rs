//! Request descriptor
//!
//! Built per call and never persisted.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::errors::ApiError;

/// One HTTP exchange to perform against the API base URL
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    endpoint: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl ApiRequest {
    /// Request with no query and no body.
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self { method, endpoint: endpoint.into(), query: Vec::new(), body: None }
    }

    /// `GET` request for `endpoint`.
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    /// `POST` request for `endpoint`.
    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    /// `PUT` request for `endpoint`.
    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PUT, endpoint)
    }

    /// `PATCH` request for `endpoint`.
    pub fn patch(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PATCH, endpoint)
    }

    /// `DELETE` request for `endpoint`.
    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    /// Append query parameters.
    #[must_use]
    pub fn query(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encoding`] if `body` cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| {
            ApiError::Encoding(format!("Failed to encode request for {}: {e}", self.endpoint))
        })?;
        self.body = Some(value);
        Ok(self)
    }

    /// HTTP method.
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Path relative to the base URL, starting with `/`.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Query parameters in insertion order.
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Encoded JSON body, if any.
    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;

    #[test]
    fn builds_descriptor() {
        let request = ApiRequest::post("/goals")
            .query([("page".to_string(), "2".to_string())])
            .json(&json!({ "title": "Car" }))
            .unwrap();

        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.endpoint(), "/goals");
        assert_eq!(request.query_pairs(), [("page".to_string(), "2".to_string())]);
        assert_eq!(request.body(), Some(&json!({ "title": "Car" })));
    }

    #[test]
    fn unencodable_body_is_an_encoding_error() {
        // JSON object keys must be strings.
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], 1);
        let result = ApiRequest::post("/x").json(&map);
        assert!(matches!(result, Err(ApiError::Encoding(_))));
    }
}
