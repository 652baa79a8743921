//! Domain types and models
//!
//! Every type here mirrors a server JSON shape (camelCase on the wire).
//! Request types omit blank optional fields when serialized.

pub mod accounts;
pub mod auth;
pub mod brokerage;
pub mod catalog;
pub mod goals;
pub mod investments;
pub mod pin;
pub mod transactions;

use serde::{Deserialize, Serialize};

pub use accounts::*;
pub use auth::*;
pub use brokerage::*;
pub use catalog::*;
pub use goals::*;
pub use investments::*;
pub use pin::*;
pub use transactions::*;

/// Generic acknowledgement body (`{ "message": "..." }`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}
