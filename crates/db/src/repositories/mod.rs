//! Catalog repositories.
//!
//! [`CatalogRepository`] is implemented by an in-memory fixture catalog and
//! by PostgreSQL. Both apply the same soft-delete policy (deleted rows are
//! left out of listings unless asked for) and both filter through
//! [`artisan_core::catalog::filter_products`], so results do not depend on
//! which store is behind the API.

mod fixture_catalog;
mod pg_catalog;

use async_trait::async_trait;
use artisan_core::catalog::filter_products;
use artisan_core::error::CoreError;
use artisan_core::types::DbId;

use crate::models::category::{Category, CreateCategory, UpdateCategory};
use crate::models::product::{CreateProduct, Product, ProductListParams, UpdateProduct};

pub use fixture_catalog::FixtureCatalog;
pub use pg_catalog::PgCatalog;

/// Errors raised by catalog repositories.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// A domain rule was violated (unknown category, invalid input, ...).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The database rejected or failed the query.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Read/write access to products and categories.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Products matching `params`, in id order. Soft-deleted products are
    /// only included when `params.include_deleted` is set.
    async fn list_products(&self, params: &ProductListParams) -> Result<Vec<Product>, RepoError>;

    /// A single product by id, deleted or not.
    async fn get_product(&self, id: DbId) -> Result<Option<Product>, RepoError>;

    async fn create_product(&self, input: &CreateProduct) -> Result<Product, RepoError>;

    /// Returns `None` when no product has this id.
    async fn update_product(
        &self,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, RepoError>;

    /// Stamp `deleted_at`. Returns `false` when no product has this id.
    /// Deleting twice keeps the first deletion time.
    async fn soft_delete_product(&self, id: DbId) -> Result<bool, RepoError>;

    /// Categories in id order, optionally including soft-deleted ones.
    async fn list_categories(&self, include_deleted: bool) -> Result<Vec<Category>, RepoError>;

    async fn get_category(&self, id: DbId) -> Result<Option<Category>, RepoError>;

    async fn create_category(&self, input: &CreateCategory) -> Result<Category, RepoError>;

    async fn update_category(
        &self,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, RepoError>;

    async fn soft_delete_category(&self, id: DbId) -> Result<bool, RepoError>;

    /// Whether the backing store is reachable.
    async fn health_check(&self) -> Result<(), RepoError>;
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Apply the soft-delete policy and the catalog filter, keeping order.
fn select_products(products: Vec<Product>, params: &ProductListParams) -> Vec<Product> {
    let visible: Vec<Product> = products
        .into_iter()
        .filter(|p| params.include_deleted || !p.is_deleted())
        .collect();

    filter_products(&visible, &params.criteria())
        .into_iter()
        .cloned()
        .collect()
}

/// Embed each product's category (when it exists) into the product.
fn attach_categories(products: &mut [Product], categories: &[Category]) {
    for product in products {
        product.category = categories
            .iter()
            .find(|c| c.id == product.category_id)
            .cloned();
    }
}

/// Reject products pointing at a category that does not exist or has been
/// soft-deleted. Products already in a deleted category keep it.
fn ensure_category_active(category: Option<&Category>, id: DbId) -> Result<(), RepoError> {
    match category {
        Some(c) if !c.is_deleted() => Ok(()),
        Some(_) => Err(CoreError::Validation(format!("Category {id} has been deleted")).into()),
        None => Err(CoreError::Validation(format!("Category {id} does not exist")).into()),
    }
}
