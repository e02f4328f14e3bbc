use diesel::define_sql_function;
use diesel::prelude::*;

use crate::domain::product::{NewProduct, Product, ProductStats, ProductUpdate};
use crate::domain::types::ProductId;
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, ProductChangeset,
};
use crate::repository::{
    DieselRepository, ProductListQuery, ProductReader, ProductWriter, RepositoryError,
    RepositoryResult, SortBy, SortOrder,
};

define_sql_function! {
    /// SQLite `lower`, used for case-insensitive name search.
    fn lower(value: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

impl ProductReader for DieselRepository {
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = products::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(search) = &query.search {
                let pattern = format!("%{}%", search.to_lowercase());
                items = items.filter(lower(products::name).like(pattern));
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();

        items = match (query.sort_by, query.order) {
            (SortBy::Id, SortOrder::Asc) => items.order(products::id.asc()),
            (SortBy::Id, SortOrder::Desc) => items.order(products::id.desc()),
            (SortBy::Name, SortOrder::Asc) => items.order(products::name.asc()),
            (SortBy::Name, SortOrder::Desc) => items.order(products::name.desc()),
            (SortBy::Quantity, SortOrder::Asc) => items.order(products::quantity.asc()),
            (SortBy::Quantity, SortOrder::Desc) => items.order(products::quantity.desc()),
            (SortBy::Price, SortOrder::Asc) => items.order(products::price.asc()),
            (SortBy::Price, SortOrder::Desc) => items.order(products::price.desc()),
            (SortBy::CreatedAt, SortOrder::Asc) => items.order(products::created_at.asc()),
            (SortBy::CreatedAt, SortOrder::Desc) => items.order(products::created_at.desc()),
            (SortBy::UpdatedAt, SortOrder::Asc) => items.order(products::updated_at.asc()),
            (SortBy::UpdatedAt, SortOrder::Desc) => items.order(products::updated_at.desc()),
        };

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let items = items
            .load::<DbProduct>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Product>, _>>()?;

        Ok((total, items))
    }

    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let product = products::table
            .filter(products::id.eq(id.get()))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        let product = product.map(TryInto::try_into).transpose()?;
        Ok(product)
    }

    fn product_stats(&self) -> RepositoryResult<ProductStats> {
        use crate::schema::products;
        use diesel::dsl::{avg, count_star, sum};

        let mut conn = self.conn()?;

        let total_products: i64 = products::table
            .select(count_star())
            .get_result(&mut conn)?;
        let total_value: Option<f64> = products::table
            .select(sum(products::price))
            .get_result(&mut conn)?;
        let total_quantity: Option<i64> = products::table
            .select(sum(products::quantity))
            .get_result(&mut conn)?;
        let average_price: Option<f64> = products::table
            .select(avg(products::price))
            .get_result(&mut conn)?;

        Ok(ProductStats {
            total_products,
            total_value: total_value.unwrap_or(0.0),
            total_quantity: total_quantity.unwrap_or(0),
            average_price: average_price.unwrap_or(0.0),
        })
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_product: DbNewProduct = product.into();

        let created = diesel::insert_into(products::table)
            .values(&db_product)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_product(&self, id: ProductId, update: &ProductUpdate) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let changeset: ProductChangeset = update.into();

        let updated = diesel::update(products::table.filter(products::id.eq(id.get())))
            .set(&changeset)
            .get_result::<DbProduct>(&mut conn)
            .optional()?;

        let updated = updated.ok_or(RepositoryError::NotFound)?;
        Ok(updated.try_into()?)
    }

    fn delete_product(&self, id: ProductId) -> RepositoryResult<usize> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let affected = diesel::delete(products::table.filter(products::id.eq(id.get())))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_products(&self, ids: &[ProductId]) -> RepositoryResult<usize> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let ids: Vec<i32> = ids.iter().map(ProductId::get).collect();

        let affected = diesel::delete(products::table.filter(products::id.eq_any(ids)))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
