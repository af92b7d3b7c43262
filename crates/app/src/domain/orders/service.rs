//! Orders service.

use async_trait::async_trait;
use dink::orders::OrderStatus;
use mockall::automock;

use crate::api::{Api, ApiError};

use super::models::{NewOrder, OrderRecord, StoreSummary};

/// HTTP client for the orders and dashboard endpoints.
#[derive(Debug, Clone)]
pub struct HttpOrdersService {
    api: Api,
}

impl HttpOrdersService {
    #[must_use]
    pub fn new(api: Api) -> Self {
        Self { api }
    }
}

#[async_trait]
impl OrdersService for HttpOrdersService {
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, ApiError> {
        let response = self
            .api
            .http()
            .post(self.api.url("/orders"))
            .json(&order)
            .send()
            .await?;

        self.api.decode(response).await
    }

    async fn list_orders(&self) -> Result<Vec<OrderRecord>, ApiError> {
        let response = self
            .api
            .http()
            .get(self.api.url("/orders"))
            .send()
            .await?;

        self.api.decode(response).await
    }

    async fn get_order(&self, id: u64) -> Result<OrderRecord, ApiError> {
        let response = self
            .api
            .http()
            .get(self.api.url(&format!("/orders/{id}")))
            .send()
            .await?;

        self.api.decode(response).await
    }

    async fn update_status(&self, id: u64, status: OrderStatus) -> Result<OrderRecord, ApiError> {
        let response = self
            .api
            .http()
            .patch(self.api.url(&format!("/orders/{id}/status")))
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await?;

        self.api.decode(response).await
    }

    async fn summary(&self) -> Result<StoreSummary, ApiError> {
        let response = self.api.http().get(self.api.url("/meta")).send().await?;

        self.api.decode(response).await
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Submit a cart snapshot plus customer fields as a new order.
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, ApiError>;

    /// Retrieve all orders for the back office.
    async fn list_orders(&self) -> Result<Vec<OrderRecord>, ApiError>;

    /// Retrieve a single order.
    async fn get_order(&self, id: u64) -> Result<OrderRecord, ApiError>;

    /// Ask the backend to move an order to a new status.
    ///
    /// Callers check [`OrderStatus::validate_transition`] first; the
    /// backend re-validates regardless.
    async fn update_status(&self, id: u64, status: OrderStatus) -> Result<OrderRecord, ApiError>;

    /// Dashboard counters and revenue.
    async fn summary(&self) -> Result<StoreSummary, ApiError>;
}
