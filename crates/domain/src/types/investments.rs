//! Investment assets, purchase lots and the portfolio summary

use serde::{Deserialize, Serialize};

use crate::utils::serde_helpers::{amount, id, is_blank, opt_amount, opt_id};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentAsset {
    #[serde(deserialize_with = "id")]
    pub id: String,
    pub ticker: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "opt_amount", skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetRequest {
    pub ticker: String,
    #[serde(skip_serializing_if = "is_blank")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "is_blank")]
    pub asset_type: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub currency: Option<String>,
}

/// A single purchase of an asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentLot {
    #[serde(deserialize_with = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_id", skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    #[serde(deserialize_with = "amount")]
    pub quantity: f64,
    #[serde(deserialize_with = "amount")]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchased_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLotRequest {
    pub quantity: f64,
    pub price: f64,
    #[serde(skip_serializing_if = "is_blank")]
    pub purchased_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPosition {
    #[serde(deserialize_with = "id")]
    pub asset_id: String,
    pub ticker: String,
    #[serde(deserialize_with = "amount")]
    pub quantity: f64,
    #[serde(deserialize_with = "amount")]
    pub average_price: f64,
    #[serde(default, deserialize_with = "opt_amount", skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    #[serde(deserialize_with = "amount")]
    pub total_value: f64,
    #[serde(deserialize_with = "amount")]
    pub total_cost: f64,
    #[serde(deserialize_with = "amount")]
    pub profit: f64,
    #[serde(default, deserialize_with = "opt_amount", skip_serializing_if = "Option::is_none")]
    pub profit_percent: Option<f64>,
    #[serde(default)]
    pub positions: Vec<PortfolioPosition>,
}
