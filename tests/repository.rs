use std::thread::sleep;
use std::time::Duration;

use product_catalog::domain::product::{NewProduct, ProductUpdate};
use product_catalog::domain::types::{
    ImageRef, PLACEHOLDER_IMAGE, Price, ProductId, ProductName, Quantity,
};
use product_catalog::repository::{
    DieselRepository, ProductListQuery, ProductReader, ProductWriter, SortBy, SortOrder,
};

mod common;

fn new_product(name: &str, quantity: i32, price: f64) -> NewProduct {
    NewProduct::new(
        ProductName::new(name).expect("valid name"),
        Quantity::new(quantity).expect("valid quantity"),
        Price::new(price).expect("valid price"),
        None,
    )
}

#[test]
fn create_and_get_product_round_trip() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_product(&new_product("Widget", 5, 9.99))
        .expect("should create product");
    assert_eq!(created.name.as_str(), "Widget");
    assert_eq!(created.quantity.get(), 5);
    assert_eq!(created.price.get(), 9.99);
    // No upload: the shared placeholder is stored.
    assert_eq!(created.image.as_str(), PLACEHOLDER_IMAGE);

    let fetched = repo
        .get_product_by_id(created.id)
        .expect("should query product")
        .expect("product should exist");
    assert_eq!(fetched, created);

    let missing = repo
        .get_product_by_id(ProductId::new(9999).expect("valid id"))
        .expect("should query product");
    assert!(missing.is_none());
}

#[test]
fn list_products_searches_name_case_insensitively() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    for (name, quantity, price) in [
        ("Laptop Dell XPS 13", 15, 1299.99),
        ("MacBook Pro 16", 10, 2499.99),
        ("iPhone 14 Pro", 25, 999.99),
    ] {
        repo.create_product(&new_product(name, quantity, price))
            .expect("should create product");
    }

    let (total, products) = repo
        .list_products(ProductListQuery::default().search("PRO"))
        .expect("should list products");
    assert_eq!(total, 2);
    let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
    assert!(names.contains(&"MacBook Pro 16"));
    assert!(names.contains(&"iPhone 14 Pro"));

    let (total, products) = repo
        .list_products(ProductListQuery::default().search("no such product"))
        .expect("should list products");
    assert_eq!(total, 0);
    assert!(products.is_empty());
}

#[test]
fn list_products_sorts_and_paginates() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    for (name, price) in [("Cheap", 1.5), ("Pricey", 30.0), ("Middle", 10.0)] {
        repo.create_product(&new_product(name, 1, price))
            .expect("should create product");
    }

    let (_, products) = repo
        .list_products(ProductListQuery::default().sort(SortBy::Price, SortOrder::Asc))
        .expect("should list products");
    let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Cheap", "Middle", "Pricey"]);

    let (total, page) = repo
        .list_products(
            ProductListQuery::default()
                .sort(SortBy::Price, SortOrder::Asc)
                .paginate(2, 2),
        )
        .expect("should list products");
    assert_eq!(total, 3);
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name.as_str(), "Pricey");
}

#[test]
fn update_product_applies_partial_changes() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_product(&new_product("Widget", 5, 9.99))
        .expect("should create product");

    // Make the updated_at bump observable.
    sleep(Duration::from_millis(10));

    let update = ProductUpdate {
        price: Some(Price::new(12.5).expect("valid price")),
        image: Some(ImageRef::local("product-1-1.jpg")),
        ..Default::default()
    };
    let updated = repo
        .update_product(created.id, &update)
        .expect("should update product");

    // Untouched fields survive, changed fields land, updated_at moves.
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.quantity, created.quantity);
    assert_eq!(updated.price.get(), 12.5);
    assert_eq!(updated.image.as_str(), "/uploads/product-1-1.jpg");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    let missing = repo.update_product(
        ProductId::new(9999).expect("valid id"),
        &ProductUpdate::default(),
    );
    assert!(missing.is_err());
}

#[test]
fn delete_product_removes_the_row() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_product(&new_product("Widget", 5, 9.99))
        .expect("should create product");

    let deleted = repo
        .delete_product(created.id)
        .expect("should delete product");
    assert_eq!(deleted, 1);
    assert!(
        repo.get_product_by_id(created.id)
            .expect("should query product")
            .is_none()
    );

    let deleted = repo
        .delete_product(created.id)
        .expect("should delete product");
    assert_eq!(deleted, 0);
}

#[test]
fn delete_products_counts_only_existing_rows() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let first = repo
        .create_product(&new_product("First", 1, 1.0))
        .expect("should create product");
    let second = repo
        .create_product(&new_product("Second", 2, 2.0))
        .expect("should create product");
    let survivor = repo
        .create_product(&new_product("Survivor", 3, 3.0))
        .expect("should create product");

    let ids = [first.id, second.id, ProductId::new(9999).expect("valid id")];
    let deleted = repo
        .delete_products(&ids)
        .expect("should bulk delete products");
    assert_eq!(deleted, 2);

    let (total, _) = repo
        .list_products(ProductListQuery::default())
        .expect("should list products");
    assert_eq!(total, 1);
    assert!(
        repo.get_product_by_id(survivor.id)
            .expect("should query product")
            .is_some()
    );
}

#[test]
fn product_stats_aggregates_the_whole_table() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let empty = repo.product_stats().expect("should compute stats");
    assert_eq!(empty.total_products, 0);
    assert_eq!(empty.total_quantity, 0);
    assert_eq!(empty.total_value, 0.0);
    assert_eq!(empty.average_price, 0.0);

    repo.create_product(&new_product("First", 2, 10.0))
        .expect("should create product");
    repo.create_product(&new_product("Second", 3, 20.0))
        .expect("should create product");

    let stats = repo.product_stats().expect("should compute stats");
    assert_eq!(stats.total_products, 2);
    assert_eq!(stats.total_quantity, 5);
    // total_value is the sum of unit prices, quantities do not weigh in.
    assert_eq!(stats.total_value, 30.0);
    assert_eq!(stats.average_price, 15.0);
}
