//! PostgreSQL-backed catalog (`products` and `categories` tables).
//!
//! The category predicate and soft-delete policy are pushed into SQL; the
//! search predicate runs through the shared catalog filter so matching is
//! identical to the fixture catalog.

use async_trait::async_trait;
use sqlx::PgPool;
use artisan_core::catalog::CategorySelection;
use artisan_core::types::DbId;

use super::{
    attach_categories, ensure_category_active, select_products, CatalogRepository, RepoError,
};
use crate::models::category::{Category, CreateCategory, UpdateCategory};
use crate::models::product::{CreateProduct, Product, ProductListParams, UpdateProduct};

/// Column list for `products` queries. Price is stored as NUMERIC and read
/// back as double precision.
const PRODUCT_COLUMNS: &str = "\
    id, name, short_description, description, price::float8 AS price, image_url, \
    category_id, created_at, updated_at, deleted_at";

/// Column list for `categories` queries.
const CATEGORY_COLUMNS: &str = "\
    id, name, description, image_url, created_at, updated_at, deleted_at";

/// Catalog stored in PostgreSQL.
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn category_of(&self, product: &mut Product) -> Result<(), RepoError> {
        product.category = self.get_category(product.category_id).await?;
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for PgCatalog {
    async fn list_products(&self, params: &ProductListParams) -> Result<Vec<Product>, RepoError> {
        let category_id = match params.category_id {
            CategorySelection::All => None,
            CategorySelection::Id(id) => Some(id),
        };

        let query = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE ($1::BIGINT IS NULL OR category_id = $1) \
               AND ($2 OR deleted_at IS NULL) \
             ORDER BY id"
        );
        let rows = sqlx::query_as::<_, Product>(&query)
            .bind(category_id)
            .bind(params.include_deleted)
            .fetch_all(&self.pool)
            .await?;

        let mut selected = select_products(rows, params);
        let categories = self.list_categories(true).await?;
        attach_categories(&mut selected, &categories);
        Ok(selected)
    }

    async fn get_product(&self, id: DbId) -> Result<Option<Product>, RepoError> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match product {
            Some(mut product) => {
                self.category_of(&mut product).await?;
                Ok(Some(product))
            }
            None => Ok(None),
        }
    }

    async fn create_product(&self, input: &CreateProduct) -> Result<Product, RepoError> {
        let category = self.get_category(input.category_id).await?;
        ensure_category_active(category.as_ref(), input.category_id)?;

        let query = format!(
            "INSERT INTO products \
                 (name, short_description, description, price, image_url, category_id) \
             VALUES ($1, $2, $3, $4::NUMERIC, $5, $6) \
             RETURNING {PRODUCT_COLUMNS}"
        );
        let mut product = sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(&input.short_description)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.image_url)
            .bind(input.category_id)
            .fetch_one(&self.pool)
            .await?;

        product.category = category;
        tracing::debug!(product_id = product.id, "Product inserted");
        Ok(product)
    }

    async fn update_product(
        &self,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, RepoError> {
        if let Some(category_id) = input.category_id {
            let category = self.get_category(category_id).await?;
            ensure_category_active(category.as_ref(), category_id)?;
        }

        let query = format!(
            "UPDATE products SET \
                 name = COALESCE($2, name), \
                 short_description = COALESCE($3, short_description), \
                 description = COALESCE($4, description), \
                 price = COALESCE($5::NUMERIC, price), \
                 image_url = COALESCE($6, image_url), \
                 category_id = COALESCE($7, category_id), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {PRODUCT_COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(input.name.as_deref())
            .bind(input.short_description.as_deref())
            .bind(input.description.as_deref())
            .bind(input.price)
            .bind(input.image_url.as_deref())
            .bind(input.category_id)
            .fetch_optional(&self.pool)
            .await?;

        match product {
            Some(mut product) => {
                self.category_of(&mut product).await?;
                Ok(Some(product))
            }
            None => Ok(None),
        }
    }

    async fn soft_delete_product(&self, id: DbId) -> Result<bool, RepoError> {
        let result = sqlx::query(
            "UPDATE products SET deleted_at = COALESCE(deleted_at, NOW()) WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_categories(&self, include_deleted: bool) -> Result<Vec<Category>, RepoError> {
        let query = format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories \
             WHERE ($1 OR deleted_at IS NULL) \
             ORDER BY id"
        );
        let categories = sqlx::query_as::<_, Category>(&query)
            .bind(include_deleted)
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    async fn get_category(&self, id: DbId) -> Result<Option<Category>, RepoError> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1");
        let category = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(category)
    }

    async fn create_category(&self, input: &CreateCategory) -> Result<Category, RepoError> {
        let query = format!(
            "INSERT INTO categories (name, description, image_url) \
             VALUES ($1, $2, $3) \
             RETURNING {CATEGORY_COLUMNS}"
        );
        let category = sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.image_url)
            .fetch_one(&self.pool)
            .await?;
        Ok(category)
    }

    async fn update_category(
        &self,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, RepoError> {
        let query = format!(
            "UPDATE categories SET \
                 name = COALESCE($2, name), \
                 description = COALESCE($3, description), \
                 image_url = COALESCE($4, image_url), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {CATEGORY_COLUMNS}"
        );
        let category = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(input.name.as_deref())
            .bind(input.description.as_deref())
            .bind(input.image_url.as_deref())
            .fetch_optional(&self.pool)
            .await?;
        Ok(category)
    }

    async fn soft_delete_category(&self, id: DbId) -> Result<bool, RepoError> {
        let result = sqlx::query(
            "UPDATE categories SET deleted_at = COALESCE(deleted_at, NOW()) WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), RepoError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
