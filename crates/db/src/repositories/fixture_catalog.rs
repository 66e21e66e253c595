//! In-memory catalog seeded with sample products.
//!
//! Serves the site when no database is configured and backs the API
//! integration tests. Writes live only as long as the process.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use artisan_core::types::DbId;

use super::{
    attach_categories, ensure_category_active, select_products, CatalogRepository, RepoError,
};
use crate::models::category::{Category, CreateCategory, UpdateCategory};
use crate::models::product::{CreateProduct, Product, ProductListParams, UpdateProduct};

/// Names of the seeded categories, ids 1 through 4.
const SEED_CATEGORIES: [&str; 4] = ["Cerámica", "Madera", "Textil", "Joyería"];

/// Number of seeded products.
const SEED_PRODUCT_COUNT: DbId = 12;

const SEED_LONG_DESCRIPTION: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
    Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.";

/// Catalog held in process memory.
pub struct FixtureCatalog {
    products: RwLock<Vec<Product>>,
    categories: RwLock<Vec<Category>>,
}

impl FixtureCatalog {
    /// A catalog holding exactly these rows.
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            products: RwLock::new(products),
            categories: RwLock::new(categories),
        }
    }

    /// The sample catalog: 4 categories and 12 products, product `n` filed
    /// under category `(n - 1) % 4 + 1`.
    pub fn seeded() -> Self {
        let now = Utc::now();

        let categories = SEED_CATEGORIES
            .iter()
            .zip(1..)
            .map(|(name, id)| Category {
                id,
                name: (*name).to_string(),
                description: format!("Productos artesanales de {}", name.to_lowercase()),
                image_url: format!("/images/category-{id}.jpg"),
                created_at: now,
                updated_at: now,
                deleted_at: None,
            })
            .collect();

        let products = (1..=SEED_PRODUCT_COUNT)
            .map(|id| {
                let category_id = (id - 1) % 4 + 1;
                Product {
                    id,
                    name: format!("Producto Artesanal {id}"),
                    short_description: format!("Breve descripción del producto artesanal {id}"),
                    description: format!(
                        "Descripción detallada del producto artesanal {id}. {SEED_LONG_DESCRIPTION}"
                    ),
                    price: 19.99 + 5.0 * (id - 1) as f64,
                    image_url: format!("/images/product-{category_id}.jpg"),
                    category_id,
                    created_at: now,
                    updated_at: now,
                    deleted_at: None,
                    category: None,
                }
            })
            .collect();

        Self::new(products, categories)
    }
}

fn next_id<T>(rows: &[T], id: impl Fn(&T) -> DbId) -> DbId {
    rows.iter().map(id).max().unwrap_or(0) + 1
}

#[async_trait]
impl CatalogRepository for FixtureCatalog {
    async fn list_products(&self, params: &ProductListParams) -> Result<Vec<Product>, RepoError> {
        let products = self.products.read().await.clone();
        let mut selected = select_products(products, params);
        attach_categories(&mut selected, &self.categories.read().await);
        Ok(selected)
    }

    async fn get_product(&self, id: DbId) -> Result<Option<Product>, RepoError> {
        let Some(mut product) = self.products.read().await.iter().find(|p| p.id == id).cloned()
        else {
            return Ok(None);
        };
        attach_categories(std::slice::from_mut(&mut product), &self.categories.read().await);
        Ok(Some(product))
    }

    async fn create_product(&self, input: &CreateProduct) -> Result<Product, RepoError> {
        let categories = self.categories.read().await;
        let category = categories.iter().find(|c| c.id == input.category_id);
        ensure_category_active(category, input.category_id)?;

        let now = Utc::now();
        let mut products = self.products.write().await;
        let product = Product {
            id: next_id(products.as_slice(), |p| p.id),
            name: input.name.clone(),
            short_description: input.short_description.clone(),
            description: input.description.clone(),
            price: input.price,
            image_url: input.image_url.clone(),
            category_id: input.category_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            category: None,
        };
        products.push(product.clone());

        Ok(Product {
            category: category.cloned(),
            ..product
        })
    }

    async fn update_product(
        &self,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, RepoError> {
        let categories = self.categories.read().await;
        if let Some(category_id) = input.category_id {
            let category = categories.iter().find(|c| c.id == category_id);
            ensure_category_active(category, category_id)?;
        }

        let mut products = self.products.write().await;
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        if let Some(name) = &input.name {
            product.name = name.clone();
        }
        if let Some(short_description) = &input.short_description {
            product.short_description = short_description.clone();
        }
        if let Some(description) = &input.description {
            product.description = description.clone();
        }
        if let Some(price) = input.price {
            product.price = price;
        }
        if let Some(image_url) = &input.image_url {
            product.image_url = image_url.clone();
        }
        if let Some(category_id) = input.category_id {
            product.category_id = category_id;
        }
        product.updated_at = Utc::now();

        let mut updated = product.clone();
        attach_categories(std::slice::from_mut(&mut updated), &categories);
        Ok(Some(updated))
    }

    async fn soft_delete_product(&self, id: DbId) -> Result<bool, RepoError> {
        let mut products = self.products.write().await;
        match products.iter_mut().find(|p| p.id == id) {
            Some(product) => {
                product.deleted_at.get_or_insert_with(Utc::now);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_categories(&self, include_deleted: bool) -> Result<Vec<Category>, RepoError> {
        let categories = self.categories.read().await;
        Ok(categories
            .iter()
            .filter(|c| include_deleted || !c.is_deleted())
            .cloned()
            .collect())
    }

    async fn get_category(&self, id: DbId) -> Result<Option<Category>, RepoError> {
        let categories = self.categories.read().await;
        Ok(categories.iter().find(|c| c.id == id).cloned())
    }

    async fn create_category(&self, input: &CreateCategory) -> Result<Category, RepoError> {
        let now = Utc::now();
        let mut categories = self.categories.write().await;
        let category = Category {
            id: next_id(categories.as_slice(), |c| c.id),
            name: input.name.clone(),
            description: input.description.clone(),
            image_url: input.image_url.clone(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, RepoError> {
        let mut categories = self.categories.write().await;
        let Some(category) = categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };

        if let Some(name) = &input.name {
            category.name = name.clone();
        }
        if let Some(description) = &input.description {
            category.description = description.clone();
        }
        if let Some(image_url) = &input.image_url {
            category.image_url = image_url.clone();
        }
        category.updated_at = Utc::now();

        Ok(Some(category.clone()))
    }

    async fn soft_delete_category(&self, id: DbId) -> Result<bool, RepoError> {
        let mut categories = self.categories.write().await;
        match categories.iter_mut().find(|c| c.id == id) {
            Some(category) => {
                category.deleted_at.get_or_insert_with(Utc::now);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn health_check(&self) -> Result<(), RepoError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
