//! End-to-end tests for the authenticated API client
//!
//! **Coverage:**
//! - Credential persistence on login, registration and logout
//! - Authorization header attachment
//! - Refresh-and-retry on 401, including failure and concurrency cases
//! - Error normalization and transport diagnostics
//!
//! **Infrastructure:**
//! - WireMock HTTP server
//! - In-memory keychain behind the real credential store

#![allow(dead_code)]

#[path = "support.rs"]
mod support;

use std::time::Duration;

use pocketledger_domain::{
    AnalyticsPeriod, AuthState, CreateGoalRequest, LoginRequest, RegisterRequest, TransactionFilter,
    TransactionKind,
};
use pocketledger_infra::{ApiError, ApiErrorCategory};
use serde_json::json;
use support::{user_json, TestClient};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn login_request() -> LoginRequest {
    LoginRequest { email: "a@b.com".into(), password: "secret123".into() }
}

fn unauthorized() -> ResponseTemplate {
    ResponseTemplate::new(401).set_body_json(json!({ "message": "Unauthorized", "statusCode": 401 }))
}

// ============================================================================
// Session bookkeeping
// ============================================================================

#[tokio::test]
async fn login_persists_credential_bundle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "email": "a@b.com", "password": "secret123" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": user_json(),
            "token": "T1",
            "refreshToken": "R1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let test = TestClient::new(&server);
    let response = test.client.login(&login_request()).await.unwrap();

    assert_eq!(response.token, "T1");
    assert_eq!(response.refresh_token.as_deref(), Some("R1"));
    assert_eq!(test.store.access_token().await.as_deref(), Some("T1"));
    assert_eq!(test.store.refresh_token().await.as_deref(), Some("R1"));
    assert_eq!(test.store.user().await, Some(response.user.clone()));
    assert_eq!(test.client.current_user().await.map(|u| u.email), Some("a@b.com".to_string()));
    assert_eq!(test.client.auth_state(), AuthState::LoggedIn);
}

#[tokio::test]
async fn wrong_password_does_not_trigger_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let test = TestClient::signed_in(&server, "OLD", Some("R0")).await;
    let err = test.client.login(&login_request()).await.unwrap_err();

    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(err.category(), ApiErrorCategory::Authentication);
    // The previous session is untouched.
    assert_eq!(test.store.access_token().await.as_deref(), Some("OLD"));
}

#[tokio::test]
async fn register_persists_bundle_without_refresh_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "user": user_json(), "accessToken": "T1" })),
        )
        .mount(&server)
        .await;

    let test = TestClient::signed_in(&server, "OLD", Some("STALE")).await;
    let request =
        RegisterRequest { name: "Ada".into(), email: "a@b.com".into(), password: "secret123".into() };
    test.client.register(&request).await.unwrap();

    assert_eq!(test.store.access_token().await.as_deref(), Some("T1"));
    assert_eq!(test.store.refresh_token().await, None);
}

#[tokio::test]
async fn logout_clears_store_even_if_server_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let test = TestClient::signed_in(&server, "T1", Some("R1")).await;
    test.store.set_user(&serde_json::from_value(user_json()).unwrap()).await.unwrap();

    test.client.logout().await.unwrap();

    assert!(test.keychain.is_empty());
    assert_eq!(test.client.auth_state(), AuthState::LoggedOut);
}

#[tokio::test]
async fn logout_reports_clear_failure_and_keeps_state() {
    let server = MockServer::start().await;
    let test = TestClient::signed_in(&server, "T1", Some("R1")).await;
    test.keychain.set_unavailable(true);

    let err = test.client.logout().await.unwrap_err();
    assert_eq!(err.category(), ApiErrorCategory::Storage);
    assert_eq!(test.client.auth_state(), AuthState::LoggedIn);

    test.keychain.heal();
    assert_eq!(test.store.access_token().await.as_deref(), Some("T1"));
}

// ============================================================================
// Authorization header
// ============================================================================

#[tokio::test]
async fn bearer_token_attached_when_stored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/goals"))
        .and(header("Authorization", "Bearer T1"))
        .and(header("X-App-Id", "pocketledger-mobile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let test = TestClient::signed_in(&server, "T1", None).await;
    assert!(test.client.list_goals().await.unwrap().is_empty());
}

#[tokio::test]
async fn no_authorization_header_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(|req: &Request| {
            if req.headers.contains_key("authorization") {
                ResponseTemplate::new(400)
            } else {
                ResponseTemplate::new(200)
                    .set_body_json(json!([{ "id": 1, "name": "Food", "type": "expense" }]))
            }
        })
        .mount(&server)
        .await;

    let test = TestClient::new(&server);
    let categories = test.client.list_categories().await.unwrap();
    assert_eq!(categories[0].id, "1");
}

// ============================================================================
// Refresh and retry
// ============================================================================

#[tokio::test]
async fn expired_token_is_refreshed_and_request_retried_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(unauthorized())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(header("Authorization", "Bearer R1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "token": "T2", "refreshToken": "R2" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("Authorization", "Bearer T2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(1)
        .mount(&server)
        .await;

    let test = TestClient::signed_in(&server, "T1", Some("R1")).await;
    let profile = test.client.fetch_profile().await.unwrap();

    assert_eq!(profile.id, "u1");
    assert_eq!(test.store.access_token().await.as_deref(), Some("T2"));
    assert_eq!(test.store.refresh_token().await.as_deref(), Some("R2"));
    assert_eq!(test.store.user().await, Some(profile));
    assert_eq!(test.client.auth_state(), AuthState::LoggedIn);
}

#[tokio::test]
async fn rejected_refresh_returns_original_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/goals"))
        .respond_with(unauthorized())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "message": "Refresh token revoked" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let test = TestClient::signed_in(&server, "T1", Some("R1")).await;
    let err = test.client.list_goals().await.unwrap_err();

    assert_eq!(err, ApiError::Status { status: 401, message: "Unauthorized".into() });
    assert_eq!(test.client.auth_state(), AuthState::LoggedOut);
    // Stored credentials are left for an explicit logout.
    assert_eq!(test.store.access_token().await.as_deref(), Some("T1"));
}

#[tokio::test]
async fn missing_refresh_token_returns_original_error_without_refresh_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/goals"))
        .respond_with(unauthorized())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let test = TestClient::signed_in(&server, "T1", None).await;
    let err = test.client.list_goals().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.message(), "Unauthorized");
}

#[tokio::test]
async fn retry_failing_with_401_is_not_refreshed_again() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/goals"))
        .respond_with(unauthorized())
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "T2" })))
        .expect(1)
        .mount(&server)
        .await;

    let test = TestClient::signed_in(&server, "T1", Some("R1")).await;
    let err = test.client.list_goals().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn concurrent_expired_requests_share_one_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(unauthorized())
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "token": "T2" }))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(header("Authorization", "Bearer T2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(3)
        .mount(&server)
        .await;

    let test = TestClient::signed_in(&server, "T1", Some("R1")).await;
    let (goals, credits, deposits) = tokio::join!(
        test.client.list_goals(),
        test.client.list_credits(),
        test.client.list_deposits()
    );

    assert!(goals.unwrap().is_empty());
    assert!(credits.unwrap().is_empty());
    assert!(deposits.unwrap().is_empty());
}

// ============================================================================
// Error normalization
// ============================================================================

#[tokio::test]
async fn validation_errors_are_flattened() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/goals"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": [
                { "property": "title", "constraints": { "isNotEmpty": "title should not be empty" } },
                "targetAmount must be a positive number"
            ]
        })))
        .mount(&server)
        .await;

    let test = TestClient::signed_in(&server, "T1", None).await;
    let request = CreateGoalRequest { title: String::new(), target_amount: -1.0, deadline: None };
    let err = test.client.create_goal(&request).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "title should not be empty\ntargetAmount must be a positive number"
    );
    assert_eq!(err.category(), ApiErrorCategory::Validation);
}

#[tokio::test]
async fn unknown_error_shape_yields_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "code": 17 })))
        .mount(&server)
        .await;

    let test = TestClient::signed_in(&server, "T1", None).await;
    let err = test.client.delete_goal("g1").await.unwrap_err();
    assert_eq!(err.to_string(), "Request failed with status 500");
}

#[tokio::test]
async fn malformed_success_body_is_a_typed_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/investments/portfolio"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "positions": "none" })))
        .mount(&server)
        .await;

    let test = TestClient::signed_in(&server, "T1", None).await;
    let err = test.client.portfolio_summary().await.unwrap_err();
    assert_eq!(err.category(), ApiErrorCategory::Deserialization);
}

#[tokio::test]
async fn unreachable_server_reports_diagnostic() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let test = TestClient::with_base_url(&format!("http://127.0.0.1:{port}/api"));
    let err = test.client.login(&login_request()).await.unwrap_err();

    assert_eq!(err.category(), ApiErrorCategory::Network);
    assert!(err.status().is_none());
    assert!(err.message().contains(&format!("http://127.0.0.1:{port}/api")), "{err}");
}

// ============================================================================
// Query construction
// ============================================================================

#[tokio::test]
async fn transaction_filter_and_analytics_period_become_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(query_param("type", "expense"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": 7, "type": "expense", "amount": "12.50", "date": "2024-03-02" }],
            "total": 11
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/transactions/analytics"))
        .and(query_param("period", "month"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalIncome": 100, "totalExpense": 12.5, "balance": 87.5, "byCategory": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let test = TestClient::signed_in(&server, "T1", None).await;
    let filter =
        TransactionFilter { kind: Some(TransactionKind::Expense), page: Some(2), ..Default::default() };
    let page = test.client.list_transactions(&filter).await.unwrap();
    assert_eq!(page.items[0].id, "7");
    assert!((page.items[0].amount - 12.5).abs() < f64::EPSILON);

    let analytics = test.client.transaction_analytics(AnalyticsPeriod::Month).await.unwrap();
    assert!((analytics.balance - 87.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn path_ids_are_percent_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/goals/a%2Fb"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let test = TestClient::signed_in(&server, "T1", None).await;
    test.client.delete_goal("a/b").await.unwrap();
}

#[tokio::test]
async fn pin_endpoints_tolerate_empty_acknowledgements() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/pin"))
        .and(body_json(json!({ "pin": "1234" })))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/users/pin/verify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "valid": false })))
        .mount(&server)
        .await;

    let test = TestClient::signed_in(&server, "T1", None).await;
    assert_eq!(test.client.set_pin("1234").await.unwrap().message, None);
    assert!(!test.client.verify_pin("0000").await.unwrap().valid);
}
