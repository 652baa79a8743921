//! # PocketLedger Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - Credential storage (platform keychain, in-memory)
//! - The HTTP transport and the authenticated API client
//! - Configuration loading and logging setup
//!
//! ## Architecture
//! - Implements traits defined in `pocketledger-core`
//! - Contains all "impure" code (network, keychain, files, environment)

pub mod api;
pub mod config;
pub mod http;
pub mod observability;
pub mod storage;

// Re-export commonly used items
pub use api::{ApiClient, ApiError, ApiErrorCategory, ApiRequest, RefreshFailure, RequestExecutor};
pub use observability::{init_logging, LogFormat};
pub use storage::{KeychainProvider, MemoryKeychain, SecureCredentialStore, SecretBackend};
