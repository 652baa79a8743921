//! Credit and deposit accounts

use pocketledger_domain::{
    CreateCreditRequest, CreateDepositRequest, CreditAccount, CreditPaymentRequest, DepositAccount,
    DepositTopUpRequest, UpdateCreditRequest, UpdateDepositRequest,
};
use tracing::instrument;

use crate::api::client::segment;
use crate::api::{ApiClient, ApiError};

impl ApiClient {
    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self))]
    pub async fn list_credits(&self) -> Result<Vec<CreditAccount>, ApiError> {
        self.get("/credits").await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self))]
    pub async fn get_credit(&self, id: &str) -> Result<CreditAccount, ApiError> {
        self.get(format!("/credits/{}", segment(id))).await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self, request))]
    pub async fn create_credit(&self, request: &CreateCreditRequest) -> Result<CreditAccount, ApiError> {
        self.post("/credits", request).await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self, request))]
    pub async fn update_credit(
        &self,
        id: &str,
        request: &UpdateCreditRequest,
    ) -> Result<CreditAccount, ApiError> {
        self.patch(format!("/credits/{}", segment(id)), request).await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self))]
    pub async fn delete_credit(&self, id: &str) -> Result<(), ApiError> {
        self.delete(format!("/credits/{}", segment(id))).await
    }

    /// Record a repayment; returns the account with its updated balance.
    ///
    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self, request))]
    pub async fn record_credit_payment(
        &self,
        id: &str,
        request: &CreditPaymentRequest,
    ) -> Result<CreditAccount, ApiError> {
        self.post(format!("/credits/{}/payments", segment(id)), request).await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self))]
    pub async fn list_deposits(&self) -> Result<Vec<DepositAccount>, ApiError> {
        self.get("/deposits").await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self))]
    pub async fn get_deposit(&self, id: &str) -> Result<DepositAccount, ApiError> {
        self.get(format!("/deposits/{}", segment(id))).await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self, request))]
    pub async fn create_deposit(&self, request: &CreateDepositRequest) -> Result<DepositAccount, ApiError> {
        self.post("/deposits", request).await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self, request))]
    pub async fn update_deposit(
        &self,
        id: &str,
        request: &UpdateDepositRequest,
    ) -> Result<DepositAccount, ApiError> {
        self.patch(format!("/deposits/{}", segment(id)), request).await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self))]
    pub async fn delete_deposit(&self, id: &str) -> Result<(), ApiError> {
        self.delete(format!("/deposits/{}", segment(id))).await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self, request), fields(amount = request.amount))]
    pub async fn top_up_deposit(
        &self,
        id: &str,
        request: &DepositTopUpRequest,
    ) -> Result<DepositAccount, ApiError> {
        self.post(format!("/deposits/{}/top-up", segment(id)), request).await
    }
}
