//! # PocketLedger Core
//!
//! Port interfaces between the API client and its infrastructure.
//!
//! ## Architecture Principles
//! - Only depends on `pocketledger-domain`
//! - No HTTP, keychain or platform code
//! - Persisted auth state is reached only through [`CredentialStore`]

pub mod auth;

pub use auth::ports::CredentialStore;
