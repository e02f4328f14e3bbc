use chrono::{NaiveDateTime, Utc};
use serde::Serialize;

use crate::domain::types::{ImageRef, Price, ProductId, ProductName, Quantity};

/// A catalog product as stored in the entity store.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub quantity: Quantity,
    pub price: Price,
    pub image: ImageRef,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Information required to create a new [`Product`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewProduct {
    pub name: ProductName,
    pub quantity: Quantity,
    pub price: Price,
    pub image: ImageRef,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl NewProduct {
    /// Products created without an upload fall back to the placeholder image.
    pub fn new(
        name: ProductName,
        quantity: Quantity,
        price: Price,
        image: Option<ImageRef>,
    ) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            name,
            quantity,
            price,
            image: image.unwrap_or_else(ImageRef::placeholder),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update applied to an existing product. `None` fields are left
/// untouched; `updated_at` is bumped regardless.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<ProductName>,
    pub quantity: Option<Quantity>,
    pub price: Option<Price>,
    pub image: Option<ImageRef>,
}

/// Aggregates over the whole products table. Sums are zero when the table is
/// empty, never absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProductStats {
    pub total_products: i64,
    pub total_value: f64,
    pub total_quantity: i64,
    pub average_price: f64,
}
