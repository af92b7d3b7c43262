//! Catalog Models

use dink::products::ProductSnapshot;
use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Product record as served by the catalog endpoints.
///
/// Optional and list fields are defaulted; the backend has dropped and
/// added columns over time and the client should keep rendering what it
/// can.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub gender: String,
    pub price: Decimal,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub image1: Option<String>,
    #[serde(default)]
    pub image2: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_best_seller: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl ProductRecord {
    /// Capture the add-to-cart snapshot for this product.
    #[must_use]
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            stock: self.stock,
            images: self.images.clone(),
            cover_image: self.cover_image.clone(),
            image1: self.image1.clone(),
            image2: self.image2.clone(),
        }
    }

    /// Whether the shop should refuse to add this product to a cart.
    #[must_use]
    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }
}

/// Paged products payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductsResponse {
    #[serde(default)]
    pub data: Vec<ProductRecord>,
    #[serde(default)]
    pub meta: Option<ProductsPageMeta>,
}

/// Paging metadata attached to product listings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsPageMeta {
    pub page: u32,
    pub per_page: u32,
    /// Total row count; the backend serialises this as a string.
    pub total: String,
    pub total_pages: u32,
}

/// Optional catalog filters. `all` and empty values are not sent.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub gender: Option<String>,
}
