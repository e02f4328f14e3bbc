use std::process::exit;

use actix_files::Files;
use actix_multipart::form::MultipartFormConfig;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use tera::Tera;

use product_catalog::db::establish_connection_pool;
use product_catalog::models::config::ServerConfig;
use product_catalog::repository::DieselRepository;
use product_catalog::routes::pages::{create_product_page, edit_product_page};
use product_catalog::routes::products::{
    bulk_delete_products, create_product, delete_product, get_product, list_products,
    product_stats, update_product,
};
use product_catalog::routes::{json_error_handler, multipart_error_handler};
use product_catalog::services::images::ImageStore;

// The multipart extractor cap sits above the per-file limit so oversized
// uploads surface as a JSON validation error instead of a dropped connection.
const MULTIPART_TOTAL_LIMIT: usize = 12 * 1024 * 1024;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            exit(1);
        }
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to create database pool: {e}");
            exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let images = match ImageStore::new(&config.uploads_dir) {
        Ok(images) => images,
        Err(e) => {
            log::error!("Failed to open uploads directory: {e}");
            exit(1);
        }
    };
    if let Err(e) = images.ensure_placeholder() {
        log::error!("Failed to create placeholder image: {e}");
        exit(1);
    }

    let tera = match Tera::new("templates/**/*.html") {
        Ok(tera) => tera,
        Err(e) => {
            log::error!("Failed to parse templates: {e}");
            exit(1);
        }
    };

    let bind_address = (config.host.clone(), config.port);
    let uploads_dir = config.uploads_dir.clone();

    log::info!("Starting server on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(images.clone()))
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(
                MultipartFormConfig::default()
                    .total_limit(MULTIPART_TOTAL_LIMIT)
                    .error_handler(multipart_error_handler),
            )
            .service(Files::new("/uploads", &uploads_dir))
            .service(
                web::scope("/api/products")
                    // Fixed segments must register before the `{id}` matcher.
                    .service(list_products)
                    .service(product_stats)
                    .service(bulk_delete_products)
                    .service(create_product)
                    .service(get_product)
                    .service(update_product)
                    .service(delete_product),
            )
            .service(create_product_page)
            .service(edit_product_page)
    })
    .bind(bind_address)?
    .run()
    .await
}
