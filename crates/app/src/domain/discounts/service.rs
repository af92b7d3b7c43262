//! Discounts service.

use async_trait::async_trait;
use mockall::automock;

use crate::api::{Api, ApiError, check_status};

use super::models::{DiscountQuote, DiscountRecord, NewDiscount};

/// HTTP client for the discounts endpoints.
#[derive(Debug, Clone)]
pub struct HttpDiscountsService {
    api: Api,
}

impl HttpDiscountsService {
    #[must_use]
    pub fn new(api: Api) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DiscountsService for HttpDiscountsService {
    async fn validate(
        &self,
        code: &str,
        subtotal_cents: i64,
        total_qty: u32,
    ) -> Result<DiscountQuote, ApiError> {
        let response = self
            .api
            .http()
            .post(self.api.url("/discounts/validate"))
            .json(&serde_json::json!({
                "code": code,
                "subtotalCents": subtotal_cents,
                "totalQty": total_qty,
            }))
            .send()
            .await?;

        self.api.decode(response).await
    }

    async fn list(&self) -> Result<Vec<DiscountRecord>, ApiError> {
        let response = self
            .api
            .http()
            .get(self.api.url("/discounts"))
            .send()
            .await?;

        self.api.decode(response).await
    }

    async fn create(&self, discount: NewDiscount) -> Result<DiscountRecord, ApiError> {
        let response = self
            .api
            .http()
            .post(self.api.url("/discounts"))
            .json(&discount)
            .send()
            .await?;

        self.api.decode(response).await
    }

    async fn set_active(&self, id: u64, active: bool) -> Result<DiscountRecord, ApiError> {
        let response = self
            .api
            .http()
            .patch(self.api.url(&format!("/discounts/{id}")))
            .json(&serde_json::json!({ "active": active }))
            .send()
            .await?;

        self.api.decode(response).await
    }

    async fn delete(&self, id: u64) -> Result<(), ApiError> {
        let response = self
            .api
            .http()
            .delete(self.api.url(&format!("/discounts/{id}")))
            .send()
            .await?;

        check_status(response).await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait DiscountsService: Send + Sync {
    /// Validate a coupon code against the cart's subtotal and quantity.
    ///
    /// An invalid or inapplicable coupon comes back as an [`ApiError::Api`]
    /// carrying the backend's message.
    async fn validate(
        &self,
        code: &str,
        subtotal_cents: i64,
        total_qty: u32,
    ) -> Result<DiscountQuote, ApiError>;

    /// List all coupons for the back office.
    async fn list(&self) -> Result<Vec<DiscountRecord>, ApiError>;

    /// Create a coupon.
    async fn create(&self, discount: NewDiscount) -> Result<DiscountRecord, ApiError>;

    /// Enable or disable a coupon.
    async fn set_active(&self, id: u64, active: bool) -> Result<DiscountRecord, ApiError>;

    /// Delete a coupon.
    async fn delete(&self, id: u64) -> Result<(), ApiError>;
}
