//! Populate the database with a small sample catalog.
//!
//! Intended for development setups; run migrations first.

use std::process::exit;

use product_catalog::db::establish_connection_pool;
use product_catalog::domain::product::NewProduct;
use product_catalog::domain::types::{ImageRef, Price, ProductName, Quantity, TypeConstraintError};
use product_catalog::models::config::ServerConfig;
use product_catalog::repository::{DieselRepository, ProductWriter};

const SAMPLE_PRODUCTS: [(&str, i32, f64, &str); 8] = [
    (
        "Laptop Dell XPS 13",
        15,
        1299.99,
        "https://images.unsplash.com/photo-1496181133206-80ce9b88a853?auto=format&fit=crop&w=2071&q=80",
    ),
    (
        "iPhone 14 Pro",
        25,
        999.99,
        "https://images.unsplash.com/photo-1592899677977-9c10ca588bbd?auto=format&fit=crop&w=2044&q=80",
    ),
    (
        "Samsung Galaxy Watch",
        30,
        299.99,
        "https://images.unsplash.com/photo-1523275335684-37898b6baf30?auto=format&fit=crop&w=1999&q=80",
    ),
    (
        "Sony WH-1000XM4 Headphones",
        20,
        349.99,
        "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?auto=format&fit=crop&w=2070&q=80",
    ),
    (
        "iPad Pro 12.9\"",
        12,
        1099.99,
        "https://images.unsplash.com/photo-1544244015-0df4b3ffc6b0?auto=format&fit=crop&w=2086&q=80",
    ),
    (
        "Canon EOS R5 Camera",
        8,
        3899.99,
        "https://images.unsplash.com/photo-1502920917128-1aa500764cbd?auto=format&fit=crop&w=2070&q=80",
    ),
    (
        "Nintendo Switch OLED",
        18,
        349.99,
        "https://images.unsplash.com/photo-1578662996442-48f60103fc96?auto=format&fit=crop&w=2070&q=80",
    ),
    (
        "MacBook Pro 16\"",
        10,
        2499.99,
        "https://images.unsplash.com/photo-1517336714731-489689fd1ca8?auto=format&fit=crop&w=2026&q=80",
    ),
];

fn sample_products() -> Result<Vec<NewProduct>, TypeConstraintError> {
    SAMPLE_PRODUCTS
        .iter()
        .map(|&(name, quantity, price, image)| {
            Ok(NewProduct::new(
                ProductName::new(name)?,
                Quantity::new(quantity)?,
                Price::new(price)?,
                Some(ImageRef::new(image)?),
            ))
        })
        .collect()
}

fn main() {
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

    let products = match sample_products() {
        Ok(products) => products,
        Err(e) => {
            log::error!("Invalid sample product: {e}");
            exit(1);
        }
    };

    let mut inserted = 0;
    for product in &products {
        match repo.create_product(product) {
            Ok(created) => {
                log::info!("Seeded product {}: {}", created.id, created.name);
                inserted += 1;
            }
            Err(e) => {
                log::error!("Failed to seed '{}': {e}", product.name);
                exit(1);
            }
        }
    }
    log::info!("Database seeded with {inserted} products");
}
