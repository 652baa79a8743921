use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::api::errors::ApiError;

/// Single-attempt HTTP client carrying the fixed client headers.
///
/// Retries are a caller concern; the only retry in this client is the
/// post-refresh retry owned by the API facade.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the request once.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, reqwest::Error> {
        let request = builder.build()?;
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, url = %url.path(), "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, url = %url.path(), status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, url = %url.path(), error = %err, "HTTP request failed");
                Err(err)
            }
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    timeout: Option<Duration>,
    user_agent: Option<String>,
    default_headers: HeaderMap,
}

impl HttpClientBuilder {
    /// Per-request timeout. Without one the transport default applies.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// `User-Agent` sent with every request.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Add a header sent with every request.
    pub fn default_header(mut self, name: &str, value: &str) -> Result<Self, ApiError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ApiError::Config(format!("Invalid header name {name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| ApiError::Config(format!("Invalid value for header {name}: {e}")))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Build the client; `Accept: application/json` is always added.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if reqwest cannot build the client.
    pub fn build(mut self) -> Result<HttpClient, ApiError> {
        self.default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = ReqwestClient::builder().default_headers(self.default_headers);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(HttpClient { client })
    }
}

/// Long-form message for a request that never produced a response.
///
/// The audience is a developer running the backend locally, so the message
/// lists what to check rather than echoing the raw transport error alone.
#[must_use]
pub fn transport_diagnostic(base_url: &str, err: &reqwest::Error) -> String {
    let what = if err.is_timeout() {
        "timed out before the server answered"
    } else if err.is_connect() {
        "could not connect to the server"
    } else {
        "failed before a response was received"
    };

    format!(
        "Network request to {base_url} {what}. \
         Make sure the backend is running and listening on that address, \
         and that this device has network connectivity. \
         Emulators and physical devices cannot reach the host machine through \"localhost\": \
         use 10.0.2.2 on the Android emulator or the host's LAN IP address on a device, \
         and check that no firewall or VPN blocks the port. \
         (Details: {err})"
    )
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use reqwest::StatusCode;
    use wiremock::matchers::{header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn sends_default_headers_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("X-App-Id", "pocketledger-test"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::builder()
            .default_header("X-App-Id", "pocketledger-test")
            .unwrap()
            .build()
            .unwrap();
        let response = client.send(client.request(Method::GET, server.uri())).await.unwrap();

        // Server errors are not retried at this layer.
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn rejects_invalid_header_names() {
        let result = HttpClient::builder().default_header("bad header", "x");
        assert!(matches!(result, Err(ApiError::Config(_))));
    }

    #[tokio::test]
    async fn refused_connection_gets_actionable_diagnostic() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so that requests fail with ECONNREFUSED
        let url = format!("http://{addr}");

        let client = HttpClient::builder().build().unwrap();
        let err = client.send(client.request(Method::GET, &url)).await.unwrap_err();

        let message = transport_diagnostic(&url, &err);
        assert!(message.contains(&url));
        assert!(message.contains("backend is running"));
        assert!(message.contains("10.0.2.2"));
    }
}
