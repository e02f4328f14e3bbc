//! Server-rendered form pages for creating and editing products.
//!
//! The pages collect name/quantity/price plus an optional image file and
//! submit multipart form data to the REST endpoints.

use actix_web::{HttpResponse, Responder, get, web};
use tera::{Context, Tera};

use crate::domain::types::ProductId;
use crate::dto::products::ApiProduct;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{render_template, service_error_response};
use crate::services::ServiceError;
use crate::services::products::get_product as get_product_service;

#[get("/products/new")]
pub async fn create_product_page(tera: web::Data<Tera>) -> impl Responder {
    render_template(&tera, "products/create.html", &Context::new())
}

#[get("/products/{id}/edit")]
pub async fn edit_product_page(
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Ok(id) = id.trim().parse::<i32>() else {
        return HttpResponse::BadRequest().body("Invalid product ID");
    };
    let Ok(id) = ProductId::new(id) else {
        return HttpResponse::NotFound().body("Product not found");
    };
    match get_product_service(id, repo.get_ref()) {
        Ok(product) => {
            let mut context = Context::new();
            context.insert("product", &ApiProduct::from(product));
            render_template(&tera, "products/edit.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().body("Product not found"),
        Err(e) => service_error_response(&e, config.debug),
    }
}
