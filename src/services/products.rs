//! Core business logic for the product endpoints.
//!
//! Each function validates input, talks to the repository through the
//! reader/writer traits and converts failures into [`ServiceError`] so that
//! the HTTP routes can remain thin wrappers.

use crate::domain::product::{Product, ProductStats};
use crate::domain::types::{ImageRef, ProductId};
use crate::forms::products::{CreateProductPayload, UpdateProductPayload};
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::{
    ProductListQuery, ProductReader, ProductWriter, SortBy, SortOrder,
};
use crate::services::images::ImageStore;

use super::{ServiceError, ServiceResult};

/// Normalized query parameters of the list endpoint.
#[derive(Debug, Clone)]
pub struct ListParams {
    pub page: usize,
    pub limit: usize,
    pub search: Option<String>,
    pub sort_by: SortBy,
    pub order: SortOrder,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_ITEMS_PER_PAGE,
            search: None,
            sort_by: SortBy::default(),
            order: SortOrder::default(),
        }
    }
}

/// List one page of products, optionally filtered by a case-insensitive
/// substring match on the name.
pub fn list_products<R>(params: ListParams, repo: &R) -> ServiceResult<Vec<Product>>
where
    R: ProductReader,
{
    let mut query = ProductListQuery::default()
        .sort(params.sort_by, params.order)
        .paginate(params.page, params.limit);
    if let Some(search) = params.search.filter(|s| !s.is_empty()) {
        query = query.search(search);
    }

    match repo.list_products(query) {
        Ok((_total, products)) => Ok(products),
        Err(e) => {
            log::error!("Failed to list products: {e}");
            Err(e.into())
        }
    }
}

pub fn get_product<R>(id: ProductId, repo: &R) -> ServiceResult<Product>
where
    R: ProductReader,
{
    match repo.get_product_by_id(id) {
        Ok(Some(product)) => Ok(product),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get product {id}: {e}");
            Err(e.into())
        }
    }
}

/// Persist a new product. Without an upload the image falls back to the
/// shared placeholder.
pub fn create_product<R>(
    payload: CreateProductPayload,
    image: Option<ImageRef>,
    repo: &R,
) -> ServiceResult<Product>
where
    R: ProductWriter,
{
    let new_product = payload.into_new_product(image);
    match repo.create_product(&new_product) {
        Ok(product) => Ok(product),
        Err(e) => {
            log::error!("Failed to create product: {e}");
            Err(e.into())
        }
    }
}

/// Apply a partial update. When a new image was uploaded the previous locally
/// stored file is removed best-effort before the row is updated; external
/// image URLs are never touched.
pub fn update_product<R>(
    id: ProductId,
    payload: UpdateProductPayload,
    new_image: Option<ImageRef>,
    repo: &R,
    images: &ImageStore,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter,
{
    let existing = get_product(id, repo)?;

    if new_image.is_some() {
        images.remove_stale(&existing.image);
    }

    let update = payload.into_product_update(new_image);
    match repo.update_product(id, &update) {
        Ok(product) => Ok(product),
        Err(e) => {
            log::error!("Failed to update product {id}: {e}");
            Err(e.into())
        }
    }
}

pub fn delete_product<R>(id: ProductId, repo: &R) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter,
{
    // Look up first so a missing id yields 404 rather than a zero-row delete.
    get_product(id, repo)?;

    match repo.delete_product(id) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete product {id}: {e}");
            Err(e.into())
        }
    }
}

/// Delete every listed id that exists; ids without a matching row are
/// silently skipped. Returns the number of rows removed.
pub fn delete_products<R>(ids: Vec<ProductId>, repo: &R) -> ServiceResult<usize>
where
    R: ProductWriter,
{
    match repo.delete_products(&ids) {
        Ok(count) => Ok(count),
        Err(e) => {
            log::error!("Failed to bulk delete products: {e}");
            Err(e.into())
        }
    }
}

pub fn product_stats<R>(repo: &R) -> ServiceResult<ProductStats>
where
    R: ProductReader,
{
    match repo.product_stats() {
        Ok(stats) => Ok(stats),
        Err(e) => {
            log::error!("Failed to compute product stats: {e}");
            Err(e.into())
        }
    }
}
