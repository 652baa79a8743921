//! Authenticated API client
//!
//! - [`ApiRequest`] describes one exchange
//! - [`RequestExecutor`] performs it and normalizes failures into [`ApiError`]
//! - [`RefreshCoordinator`] trades the refresh token for a new access token
//! - [`ApiClient`] composes them and exposes the domain operations

pub mod client;
mod commands;
pub mod errors;
pub mod executor;
pub mod refresh;
pub mod request;

pub use client::ApiClient;
pub use errors::{normalize_error_body, ApiError, ApiErrorCategory};
pub use executor::RequestExecutor;
pub use refresh::{RefreshCoordinator, RefreshFailure};
pub use request::ApiRequest;
