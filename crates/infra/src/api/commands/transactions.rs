//! Income and expense records

use pocketledger_domain::{
    AnalyticsPeriod, CreateTransactionRequest, Transaction, TransactionAnalytics, TransactionFilter,
    TransactionPage, UpdateTransactionRequest,
};
use tracing::{debug, instrument};

use crate::api::client::segment;
use crate::api::{ApiClient, ApiError};

impl ApiClient {
    /// List transactions matching `filter`; an empty filter lists the
    /// first page of everything.
    ///
    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self))]
    pub async fn list_transactions(&self, filter: &TransactionFilter) -> Result<TransactionPage, ApiError> {
        let page: TransactionPage = self.get_query("/transactions", filter.to_query()).await?;
        debug!(count = page.items.len(), "Transactions fetched");
        Ok(page)
    }

    /// # Errors
    ///
    /// Returns the normalized server error (404 for unknown ids).
    #[instrument(skip(self))]
    pub async fn get_transaction(&self, id: &str) -> Result<Transaction, ApiError> {
        self.get(format!("/transactions/{}", segment(id))).await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self, request), fields(kind = %request.kind))]
    pub async fn create_transaction(&self, request: &CreateTransactionRequest) -> Result<Transaction, ApiError> {
        self.post("/transactions", request).await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self, request))]
    pub async fn update_transaction(
        &self,
        id: &str,
        request: &UpdateTransactionRequest,
    ) -> Result<Transaction, ApiError> {
        self.patch(format!("/transactions/{}", segment(id)), request).await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self))]
    pub async fn delete_transaction(&self, id: &str) -> Result<(), ApiError> {
        self.delete(format!("/transactions/{}", segment(id))).await
    }

    /// Totals for the given period, broken down by category.
    ///
    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self))]
    pub async fn transaction_analytics(&self, period: AnalyticsPeriod) -> Result<TransactionAnalytics, ApiError> {
        self.get_query("/transactions/analytics", vec![("period".to_string(), period.to_string())])
            .await
    }
}
