//! Transaction types, filters and analytics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_wire_enum_conversions;
use crate::utils::serde_helpers::{amount, id, is_blank, opt_id};

/// Direction of money flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl_wire_enum_conversions!(TransactionKind {
    Income => "income",
    Expense => "expense",
});

/// Aggregation window for transaction analytics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsPeriod {
    Week,
    Month,
    Year,
}

impl_wire_enum_conversions!(AnalyticsPeriod {
    Week => "week",
    Month => "month",
    Year => "year",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(deserialize_with = "id")]
    pub id: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: TransactionKind,
    #[serde(deserialize_with = "amount")]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "opt_id", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, deserialize_with = "opt_id", skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Booking date as sent by the server (ISO-8601)
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    #[serde(skip_serializing_if = "is_blank")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub payment_method_id: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionRequest {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "is_blank")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub payment_method_id: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub date: Option<String>,
}

/// Query filter for listing transactions; unset fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub category_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl TransactionFilter {
    /// Query pairs in a stable order, skipping unset and blank values.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(kind) = self.kind {
            pairs.push(("type".to_string(), kind.to_string()));
        }
        let text = [("categoryId", &self.category_id), ("from", &self.from), ("to", &self.to)];
        for (key, value) in text {
            if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
                pairs.push((key.to_string(), value.to_string()));
            }
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

/// One page of transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    #[serde(alias = "data", alias = "transactions")]
    pub items: Vec<Transaction>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    #[serde(default, deserialize_with = "opt_id")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(deserialize_with = "amount")]
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionAnalytics {
    #[serde(deserialize_with = "amount")]
    pub total_income: f64,
    #[serde(deserialize_with = "amount")]
    pub total_expense: f64,
    #[serde(deserialize_with = "amount")]
    pub balance: f64,
    #[serde(default)]
    pub by_category: Vec<CategoryTotal>,
}
