//! Savings goals and their contributions

use pocketledger_domain::{ContributionRequest, CreateGoalRequest, Goal, GoalContribution, UpdateGoalRequest};
use tracing::instrument;

use crate::api::client::segment;
use crate::api::{ApiClient, ApiError};

impl ApiClient {
    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self))]
    pub async fn list_goals(&self) -> Result<Vec<Goal>, ApiError> {
        self.get("/goals").await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self))]
    pub async fn get_goal(&self, id: &str) -> Result<Goal, ApiError> {
        self.get(format!("/goals/{}", segment(id))).await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_goal(&self, request: &CreateGoalRequest) -> Result<Goal, ApiError> {
        self.post("/goals", request).await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self, request))]
    pub async fn update_goal(&self, id: &str, request: &UpdateGoalRequest) -> Result<Goal, ApiError> {
        self.patch(format!("/goals/{}", segment(id)), request).await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self))]
    pub async fn delete_goal(&self, id: &str) -> Result<(), ApiError> {
        self.delete(format!("/goals/{}", segment(id))).await
    }

    /// Add money to a goal; returns the goal with its new progress.
    ///
    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self, request), fields(amount = request.amount))]
    pub async fn add_goal_contribution(
        &self,
        id: &str,
        request: &ContributionRequest,
    ) -> Result<Goal, ApiError> {
        self.post(format!("/goals/{}/contributions", segment(id)), request).await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self))]
    pub async fn list_goal_contributions(&self, id: &str) -> Result<Vec<GoalContribution>, ApiError> {
        self.get(format!("/goals/{}/contributions", segment(id))).await
    }
}
