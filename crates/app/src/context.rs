//! App Context

use std::sync::Arc;

use crate::{
    api::Api,
    domain::{
        catalog::{CatalogService, HttpCatalogService},
        discounts::{DiscountsService, HttpDiscountsService},
        messages::{HttpMessagesService, MessagesService},
        orders::{HttpOrdersService, OrdersService},
        payments::{HttpPaymentsService, PaymentsService},
    },
};

/// Shared handles to every backend-facing service.
#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub orders: Arc<dyn OrdersService>,
    pub discounts: Arc<dyn DiscountsService>,
    pub messages: Arc<dyn MessagesService>,
    pub payments: Arc<dyn PaymentsService>,
}

impl AppContext {
    /// Build the application context from the backend base URL.
    #[must_use]
    pub fn from_base_url(base_url: &str) -> Self {
        let api = Api::new(base_url);

        Self {
            catalog: Arc::new(HttpCatalogService::new(api.clone())),
            orders: Arc::new(HttpOrdersService::new(api.clone())),
            discounts: Arc::new(HttpDiscountsService::new(api.clone())),
            messages: Arc::new(HttpMessagesService::new(api.clone())),
            payments: Arc::new(HttpPaymentsService::new(api)),
        }
    }
}
