//! Savings goals and their contributions

use serde::{Deserialize, Serialize};

use crate::utils::serde_helpers::{amount, amount_or_zero, id, is_blank, opt_id};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    #[serde(deserialize_with = "id")]
    pub id: String,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(deserialize_with = "amount")]
    pub target_amount: f64,
    #[serde(default, deserialize_with = "amount_or_zero")]
    pub current_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
    pub title: String,
    pub target_amount: f64,
    #[serde(skip_serializing_if = "is_blank")]
    pub deadline: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGoalRequest {
    #[serde(skip_serializing_if = "is_blank")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<f64>,
    #[serde(skip_serializing_if = "is_blank")]
    pub deadline: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalContribution {
    #[serde(deserialize_with = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_id", skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<String>,
    #[serde(deserialize_with = "amount")]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContributionRequest {
    pub amount: f64,
    #[serde(skip_serializing_if = "is_blank")]
    pub note: Option<String>,
}
