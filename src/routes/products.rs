//! REST endpoints under `/api/products`.
//!
//! Each handler mirrors the upstream middleware chain: id validation (where
//! applicable), upload acceptance, image processing, body validation, then
//! the store operation. All failures funnel through the shared error mapper.

use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use serde::Deserialize;

use crate::domain::types::ProductId;
use crate::dto::products::{
    ApiProduct, BulkDeleteResponse, MessageResponse, StatsResponse,
};
use crate::forms::products::{
    BulkDeleteForm, CreateProductPayload, ProductForm, UpdateProductPayload,
};
use crate::models::config::ServerConfig;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::{DieselRepository, SortBy, SortOrder};
use crate::routes::{
    invalid_id_response, service_error_response, upload_error_response,
    validation_error_response,
};
use crate::services::images::ImageStore;
use crate::services::products::{
    ListParams, create_product as create_product_service,
    delete_product as delete_product_service,
    delete_products as delete_products_service, get_product as get_product_service,
    list_products as list_products_service, product_stats as product_stats_service,
    update_product as update_product_service,
};
use crate::services::ServiceError;

#[derive(Debug, Deserialize)]
pub struct ListQueryParams {
    page: Option<usize>,
    limit: Option<usize>,
    search: Option<String>,
    #[serde(rename = "sortBy")]
    sort_by: Option<String>,
    order: Option<String>,
}

impl From<ListQueryParams> for ListParams {
    fn from(params: ListQueryParams) -> Self {
        Self {
            page: params.page.unwrap_or(1),
            limit: params.limit.unwrap_or(DEFAULT_ITEMS_PER_PAGE),
            search: params.search,
            // Unknown sort columns/directions fall back to the defaults.
            sort_by: params
                .sort_by
                .as_deref()
                .and_then(SortBy::parse)
                .unwrap_or_default(),
            order: params
                .order
                .as_deref()
                .and_then(SortOrder::parse)
                .unwrap_or_default(),
        }
    }
}

/// Parse the `:id` path segment. Non-integers are rejected as invalid ids;
/// integers that cannot be row ids (zero, negative) map to not-found.
fn parse_product_id(raw: &str) -> Result<ProductId, HttpResponse> {
    let Ok(id) = raw.trim().parse::<i32>() else {
        return Err(invalid_id_response());
    };
    ProductId::new(id).map_err(|_| service_error_response(&ServiceError::NotFound, false))
}

#[get("")]
pub async fn list_products(
    params: web::Query<ListQueryParams>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    match list_products_service(params.into_inner().into(), repo.get_ref()) {
        Ok(products) => HttpResponse::Ok().json(
            products
                .into_iter()
                .map(ApiProduct::from)
                .collect::<Vec<_>>(),
        ),
        Err(e) => service_error_response(&e, config.debug),
    }
}

#[get("/stats")]
pub async fn product_stats(
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    match product_stats_service(repo.get_ref()) {
        Ok(stats) => HttpResponse::Ok().json(StatsResponse::from(stats)),
        Err(e) => service_error_response(&e, config.debug),
    }
}

#[delete("/bulk-delete")]
pub async fn bulk_delete_products(
    form: web::Json<BulkDeleteForm>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let ids = match form.into_inner().into_ids() {
        Ok(ids) => ids,
        Err(details) => return validation_error_response(&details),
    };
    match delete_products_service(ids, repo.get_ref()) {
        Ok(count) => HttpResponse::Ok().json(BulkDeleteResponse::new(count)),
        Err(e) => service_error_response(&e, config.debug),
    }
}

#[get("/{id}")]
pub async fn get_product(
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let id = match parse_product_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match get_product_service(id, repo.get_ref()) {
        Ok(product) => HttpResponse::Ok().json(ApiProduct::from(product)),
        Err(e) => service_error_response(&e, config.debug),
    }
}

#[post("")]
pub async fn create_product(
    MultipartForm(mut form): MultipartForm<ProductForm>,
    repo: web::Data<DieselRepository>,
    images: web::Data<ImageStore>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let image = match form.image.take() {
        Some(file) => match images.process_upload(&file) {
            Ok(image) => Some(image),
            Err(e) => return upload_error_response(&e),
        },
        None => None,
    };
    let payload = match CreateProductPayload::try_from(&form) {
        Ok(payload) => payload,
        Err(details) => return validation_error_response(&details),
    };
    match create_product_service(payload, image, repo.get_ref()) {
        Ok(product) => HttpResponse::Created().json(ApiProduct::from(product)),
        Err(e) => service_error_response(&e, config.debug),
    }
}

#[put("/{id}")]
pub async fn update_product(
    id: web::Path<String>,
    MultipartForm(mut form): MultipartForm<ProductForm>,
    repo: web::Data<DieselRepository>,
    images: web::Data<ImageStore>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let id = match parse_product_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let new_image = match form.image.take() {
        Some(file) => match images.process_upload(&file) {
            Ok(image) => Some(image),
            Err(e) => return upload_error_response(&e),
        },
        None => None,
    };
    let payload = match UpdateProductPayload::try_from(&form) {
        Ok(payload) => payload,
        Err(details) => return validation_error_response(&details),
    };
    match update_product_service(id, payload, new_image, repo.get_ref(), images.get_ref()) {
        Ok(product) => HttpResponse::Ok().json(ApiProduct::from(product)),
        Err(e) => service_error_response(&e, config.debug),
    }
}

#[delete("/{id}")]
pub async fn delete_product(
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let id = match parse_product_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match delete_product_service(id, repo.get_ref()) {
        Ok(()) => {
            HttpResponse::Ok().json(MessageResponse::new("Product deleted successfully"))
        }
        Err(e) => service_error_response(&e, config.debug),
    }
}
