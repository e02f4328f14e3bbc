//! Serialization adapters at the API boundary.
//!
//! The frontend expects `_id` instead of `id` and a 2-decimal string price
//! (decimal column semantics); the domain keeps the canonical field names and
//! types, so the renaming lives here and nowhere else.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::product::{Product, ProductStats};

#[derive(Debug, Clone, Serialize)]
pub struct ApiProduct {
    #[serde(rename = "_id")]
    pub id: i32,
    pub name: String,
    pub quantity: i32,
    pub price: String,
    pub image: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for ApiProduct {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.get(),
            name: product.name.into_inner(),
            quantity: product.quantity.get(),
            price: format!("{:.2}", product.price.get()),
            image: product.image.as_str().to_string(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsData {
    pub total_products: i64,
    pub total_value: f64,
    pub total_quantity: i64,
    pub average_price: String,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub data: StatsData,
}

impl From<ProductStats> for StatsResponse {
    fn from(stats: ProductStats) -> Self {
        Self {
            success: true,
            data: StatsData {
                total_products: stats.total_products,
                total_value: (stats.total_value * 100.0).round() / 100.0,
                total_quantity: stats.total_quantity,
                average_price: format!("{:.2}", stats.average_price),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BulkDeleteResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "deletedCount")]
    pub deleted_count: usize,
}

impl BulkDeleteResponse {
    pub fn new(deleted_count: usize) -> Self {
        Self {
            success: true,
            message: format!("{deleted_count} products deleted successfully"),
            deleted_count,
        }
    }
}
