//! Credit and deposit accounts

use serde::{Deserialize, Serialize};

use crate::utils::serde_helpers::{amount, id, is_blank, opt_amount};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditAccount {
    #[serde(deserialize_with = "id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    #[serde(deserialize_with = "amount")]
    pub principal: f64,
    #[serde(deserialize_with = "amount")]
    pub interest_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_months: Option<u32>,
    #[serde(default, deserialize_with = "opt_amount", skip_serializing_if = "Option::is_none")]
    pub monthly_payment: Option<f64>,
    #[serde(default, deserialize_with = "opt_amount", skip_serializing_if = "Option::is_none")]
    pub remaining_balance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_payment_date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCreditRequest {
    pub name: String,
    #[serde(skip_serializing_if = "is_blank")]
    pub bank: Option<String>,
    pub principal: f64,
    pub interest_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_months: Option<u32>,
    #[serde(skip_serializing_if = "is_blank")]
    pub start_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCreditRequest {
    #[serde(skip_serializing_if = "is_blank")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub bank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_months: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreditPaymentRequest {
    pub amount: f64,
    #[serde(skip_serializing_if = "is_blank")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositAccount {
    #[serde(deserialize_with = "id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    #[serde(deserialize_with = "amount")]
    pub balance: f64,
    #[serde(deserialize_with = "amount")]
    pub interest_rate: f64,
    #[serde(default)]
    pub capitalization: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opened_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity_date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepositRequest {
    pub name: String,
    #[serde(skip_serializing_if = "is_blank")]
    pub bank: Option<String>,
    pub balance: f64,
    pub interest_rate: f64,
    pub capitalization: bool,
    #[serde(skip_serializing_if = "is_blank")]
    pub opened_at: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub maturity_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDepositRequest {
    #[serde(skip_serializing_if = "is_blank")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub bank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capitalization: Option<bool>,
    #[serde(skip_serializing_if = "is_blank")]
    pub maturity_date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepositTopUpRequest {
    pub amount: f64,
}
