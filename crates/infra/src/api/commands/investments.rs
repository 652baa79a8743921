//! Manually tracked investment assets and purchase lots

use pocketledger_domain::{CreateAssetRequest, CreateLotRequest, InvestmentAsset, InvestmentLot, PortfolioSummary};
use tracing::{debug, instrument};

use crate::api::client::segment;
use crate::api::{ApiClient, ApiError};

impl ApiClient {
    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self))]
    pub async fn list_assets(&self) -> Result<Vec<InvestmentAsset>, ApiError> {
        self.get("/investments/assets").await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self, request), fields(ticker = %request.ticker))]
    pub async fn create_asset(&self, request: &CreateAssetRequest) -> Result<InvestmentAsset, ApiError> {
        self.post("/investments/assets", request).await
    }

    /// Delete an asset together with its lots.
    ///
    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self))]
    pub async fn delete_asset(&self, id: &str) -> Result<(), ApiError> {
        self.delete(format!("/investments/assets/{}", segment(id))).await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self))]
    pub async fn list_lots(&self, asset_id: &str) -> Result<Vec<InvestmentLot>, ApiError> {
        self.get(format!("/investments/assets/{}/lots", segment(asset_id))).await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self, request))]
    pub async fn add_lot(&self, asset_id: &str, request: &CreateLotRequest) -> Result<InvestmentLot, ApiError> {
        self.post(format!("/investments/assets/{}/lots", segment(asset_id)), request).await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self))]
    pub async fn delete_lot(&self, lot_id: &str) -> Result<(), ApiError> {
        self.delete(format!("/investments/lots/{}", segment(lot_id))).await
    }

    /// # Errors
    ///
    /// Returns the normalized server error.
    #[instrument(skip(self))]
    pub async fn portfolio_summary(&self) -> Result<PortfolioSummary, ApiError> {
        let summary: PortfolioSummary = self.get("/investments/portfolio").await?;
        debug!(positions = summary.positions.len(), "Portfolio fetched");
        Ok(summary)
    }
}
