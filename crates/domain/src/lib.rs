//! # PocketLedger Domain
//!
//! Wire types and models shared by every PocketLedger client crate.
//!
//! This crate contains:
//! - Request/response types for each server operation
//! - The credential bundle, cached user profile and auth state
//! - Client configuration structures
//! - Domain error types and Result definitions
//!
//! ## Architecture
//! - No dependencies on other PocketLedger crates
//! - No I/O; serde models and pure helpers only

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
