//! Third-party brokerage integration types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::serde_helpers::{amount, opt_amount};

#[derive(Clone, Serialize)]
pub struct BrokerageTokenRequest {
    pub token: String,
}

impl fmt::Debug for BrokerageTokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BrokerageTokenRequest { token: <redacted> }")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokeragePosition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub figi: Option<String>,
    pub ticker: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "amount")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "opt_amount", skip_serializing_if = "Option::is_none")]
    pub average_price: Option<f64>,
    #[serde(default, deserialize_with = "opt_amount", skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokeragePortfolio {
    #[serde(default, deserialize_with = "opt_amount", skip_serializing_if = "Option::is_none")]
    pub total_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default)]
    pub positions: Vec<BrokeragePosition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecuritySearchResult {
    pub ticker: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub figi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}
