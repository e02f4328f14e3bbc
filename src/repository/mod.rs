use crate::db::{DbConnection, DbPool};
use crate::domain::product::{NewProduct, Product, ProductStats, ProductUpdate};
use crate::domain::types::ProductId;
use crate::pagination::Pagination;

pub mod errors;
pub mod product;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Columns the list endpoint may sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    Id,
    Name,
    Quantity,
    Price,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortBy {
    /// Parse a caller-supplied column name. Unknown columns yield `None` and
    /// callers fall back to the default ordering.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "quantity" => Some(Self::Quantity),
            "price" => Some(Self::Price),
            "created_at" => Some(Self::CreatedAt),
            "updated_at" => Some(Self::UpdatedAt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Query parameters used when listing products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Case-insensitive substring match on the product name.
    pub search: Option<String>,
    pub sort_by: SortBy,
    pub order: SortOrder,
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn sort(mut self, sort_by: SortBy, order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.order = order;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }
}

/// Read-only operations for product entities.
pub trait ProductReader {
    /// List products matching the supplied query parameters, together with
    /// the total match count before pagination.
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    /// Retrieve a product by its identifier.
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
    /// Aggregate count, totals and average price over the whole table.
    fn product_stats(&self) -> RepositoryResult<ProductStats>;
}

/// Write operations for product entities.
pub trait ProductWriter {
    /// Persist a new product and return the stored row.
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product>;
    /// Apply a partial update and return the updated row.
    fn update_product(&self, id: ProductId, update: &ProductUpdate) -> RepositoryResult<Product>;
    /// Delete one product, returning the number of rows removed.
    fn delete_product(&self, id: ProductId) -> RepositoryResult<usize>;
    /// Delete every product whose id is in `ids`, returning the count removed.
    fn delete_products(&self, ids: &[ProductId]) -> RepositoryResult<usize>;
}
