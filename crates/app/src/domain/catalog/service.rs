//! Catalog service.

use async_trait::async_trait;
use mockall::automock;

use crate::api::{Api, ApiError};

use super::models::{ProductFilter, ProductRecord, ProductsResponse};

/// HTTP client for the products endpoints.
#[derive(Debug, Clone)]
pub struct HttpCatalogService {
    api: Api,
}

impl HttpCatalogService {
    #[must_use]
    pub fn new(api: Api) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CatalogService for HttpCatalogService {
    async fn list_products(&self, filter: ProductFilter) -> Result<Vec<ProductRecord>, ApiError> {
        let mut query: Vec<(&str, String)> = Vec::new();

        if let Some(category) = filter.category.filter(|value| value != "all") {
            query.push(("category", category));
        }

        if let Some(gender) = filter.gender.filter(|value| value != "all") {
            query.push(("gender", gender));
        }

        let response = self
            .api
            .http()
            .get(self.api.url("/products"))
            .query(&query)
            .send()
            .await?;

        let body: ProductsResponse = self.api.decode(response).await?;

        Ok(body.data)
    }

    async fn get_product(&self, id: u64) -> Result<Option<ProductRecord>, ApiError> {
        let response = self
            .api
            .http()
            .get(self.api.url(&format!("/products/{id}")))
            .send()
            .await?;

        match self.api.decode(response).await {
            Ok(product) => Ok(Some(product)),
            Err(ApiError::NotFound) => Ok(None),
            Err(error) => Err(error),
        }
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// List products, optionally filtered by category and gender.
    async fn list_products(&self, filter: ProductFilter) -> Result<Vec<ProductRecord>, ApiError>;

    /// Fetch a single product; `None` when it does not exist.
    async fn get_product(&self, id: u64) -> Result<Option<ProductRecord>, ApiError>;
}
