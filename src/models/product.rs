use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, ProductUpdate,
};
use crate::domain::types::{
    ImageRef, Price, ProductId, ProductName, Quantity, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub quantity: i32,
    pub price: f64,
    pub image: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Product> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::new(product.id)?,
            name: ProductName::new(product.name)?,
            quantity: Quantity::new(product.quantity)?,
            price: Price::new(product.price)?,
            image: ImageRef::new(product.image)?,
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct {
    pub name: String,
    pub quantity: i32,
    pub price: f64,
    pub image: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<&DomainNewProduct> for NewProduct {
    fn from(product: &DomainNewProduct) -> Self {
        Self {
            name: product.name.as_str().to_string(),
            quantity: product.quantity.get(),
            price: product.price.get(),
            image: product.image.as_str().to_string(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Changeset for partial updates. `None` fields are skipped by Diesel;
/// `updated_at` is always set.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct ProductChangeset {
    pub name: Option<String>,
    pub quantity: Option<i32>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl From<&ProductUpdate> for ProductChangeset {
    fn from(update: &ProductUpdate) -> Self {
        Self {
            name: update.name.as_ref().map(|n| n.as_str().to_string()),
            quantity: update.quantity.map(|q| q.get()),
            price: update.price.map(|p| p.get()),
            image: update.image.as_ref().map(|i| i.as_str().to_string()),
            updated_at: Utc::now().naive_utc(),
        }
    }
}
