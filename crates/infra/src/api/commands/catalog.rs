use pocketledger_domain::{Category, CreateCategoryRequest, PaymentMethod};
use tracing::instrument;

use crate::api::{ApiClient, ApiError};

impl ApiClient {
    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get("/categories").await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_category(&self, request: &CreateCategoryRequest) -> Result<Category, ApiError> {
        self.post("/categories", request).await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self))]
    pub async fn list_payment_methods(&self) -> Result<Vec<PaymentMethod>, ApiError> {
        self.get("/payment-methods").await
    }
}
