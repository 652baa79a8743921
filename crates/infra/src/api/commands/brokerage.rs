//! Third-party brokerage link

use pocketledger_domain::{BrokeragePortfolio, BrokerageTokenRequest, MessageResponse, SecuritySearchResult};
use tracing::{info, instrument};

use crate::api::{ApiClient, ApiError};

impl ApiClient {
    /// Link a brokerage account by its API token.
    ///
    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip_all)]
    pub async fn set_brokerage_token(&self, token: &str) -> Result<MessageResponse, ApiError> {
        let response: Option<MessageResponse> =
            self.put("/brokerage/token", &BrokerageTokenRequest { token: token.to_string() }).await?;
        info!("Brokerage token stored");
        Ok(response.unwrap_or_default())
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self))]
    pub async fn remove_brokerage_token(&self) -> Result<(), ApiError> {
        self.delete("/brokerage/token").await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self))]
    pub async fn brokerage_portfolio(&self) -> Result<BrokeragePortfolio, ApiError> {
        self.get("/brokerage/portfolio").await
    }

    /// Search tradable securities by ticker or name.
    ///
    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self))]
    pub async fn search_securities(&self, query: &str) -> Result<Vec<SecuritySearchResult>, ApiError> {
        self.get_query("/brokerage/search", vec![("query".to_string(), query.to_string())]).await
    }
}
