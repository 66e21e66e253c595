//! Product model and DTOs.

use artisan_core::catalog::{CatalogItem, CategorySelection, FilterCriteria};
use artisan_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::category::Category;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `products` table.
///
/// `category` is not a column; repositories fill it in from the
/// `categories` table so clients can render the category name without a
/// second request.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub short_description: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
    pub category_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Product {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Images shown in the product detail gallery: the main image followed
    /// by two detail shots.
    pub fn gallery_images(&self) -> Vec<String> {
        let detail = self.id % 4 + 1;
        vec![
            self.image_url.clone(),
            format!("/images/product-detail-{detail}-2.jpg"),
            format!("/images/product-detail-{detail}-3.jpg"),
        ]
    }
}

impl CatalogItem for Product {
    fn id(&self) -> DbId {
        self.id
    }

    fn category_id(&self) -> DbId {
        self.category_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn short_description(&self) -> &str {
        &self.short_description
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for creating a product.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub image_url: String,
    pub category_id: DbId,
}

/// DTO for updating a product. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 255))]
    pub short_description: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(length(max = 255))]
    pub image_url: Option<String>,
    pub category_id: Option<DbId>,
}

/// Query parameters for `GET /products` (`?categoryId=&search=&includeDeleted=`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListParams {
    /// `all`, absent, or a category id.
    #[serde(default)]
    pub category_id: CategorySelection,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub include_deleted: bool,
}

impl ProductListParams {
    /// Filter criteria these parameters describe.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(self.category_id, self.search.clone().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: DbId) -> Product {
        let now = chrono::Utc::now();
        Product {
            id,
            name: format!("Producto Artesanal {id}"),
            short_description: String::new(),
            description: String::new(),
            price: 19.99,
            image_url: "/images/product-1.jpg".into(),
            category_id: 1,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            category: None,
        }
    }

    #[test]
    fn gallery_images_lead_with_main_image() {
        let images = product(5).gallery_images();
        assert_eq!(
            images,
            vec![
                "/images/product-1.jpg".to_string(),
                "/images/product-detail-2-2.jpg".to_string(),
                "/images/product-detail-2-3.jpg".to_string(),
            ]
        );
    }

    #[test]
    fn serializes_camel_case_without_absent_category() {
        let json = serde_json::to_value(product(1)).unwrap();
        assert!(json.get("shortDescription").is_some());
        assert!(json.get("categoryId").is_some());
        assert!(json["deletedAt"].is_null());
        assert!(json.get("category").is_none());
    }

    #[test]
    fn list_params_parse_from_query_string() {
        let params: ProductListParams =
            serde_json::from_value(serde_json::json!({"categoryId": "2", "search": "Jarrón"}))
                .unwrap();
        assert_eq!(params.category_id, CategorySelection::Id(2));
        assert!(!params.include_deleted);

        let criteria = params.criteria();
        assert_eq!(criteria.search_term, "Jarrón");
    }

    #[test]
    fn list_params_default_to_all() {
        let params: ProductListParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(params.criteria(), FilterCriteria::all());
    }
}
