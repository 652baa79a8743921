use std::sync::Arc;

use pocketledger_core::CredentialStore;
use pocketledger_domain::ClientConfig;
use pocketledger_infra::{ApiClient, MemoryKeychain, SecureCredentialStore};
use serde_json::{json, Value};
use wiremock::MockServer;

/// Client wired to a mock server and an in-memory keychain.
pub struct TestClient {
    pub client: ApiClient,
    pub keychain: MemoryKeychain,
    pub store: Arc<dyn CredentialStore>,
}

impl TestClient {
    pub fn new(server: &MockServer) -> Self {
        Self::with_base_url(&server.uri())
    }

    pub fn with_base_url(base_url: &str) -> Self {
        let keychain = MemoryKeychain::new();
        let store: Arc<dyn CredentialStore> =
            Arc::new(SecureCredentialStore::new(keychain.clone()));
        let config = ClientConfig {
            base_url: base_url.to_string(),
            request_timeout_secs: Some(5),
            ..ClientConfig::default()
        };
        let client = ApiClient::new(&config, Arc::clone(&store)).expect("client should build");
        Self { client, keychain, store }
    }

    /// Seed access and refresh tokens as if a previous session existed.
    pub async fn signed_in(server: &MockServer, access: &str, refresh: Option<&str>) -> Self {
        let test = Self::new(server);
        test.store.set_access_token(access).await.expect("seed access token");
        if let Some(refresh) = refresh {
            test.store.set_refresh_token(refresh).await.expect("seed refresh token");
        }
        test.client.restore_session().await;
        test
    }
}

pub fn user_json() -> Value {
    json!({ "id": "u1", "name": "Ada", "email": "a@b.com", "createdAt": "2024-03-01T10:00:00Z" })
}
