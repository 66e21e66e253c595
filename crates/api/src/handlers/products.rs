//! Handlers for the product catalog.
//!
//! Listing goes through the shared catalog filter (category selection plus
//! case-insensitive search).

use artisan_core::catalog::{related_products as pick_related, CategorySelection, DEFAULT_RELATED_LIMIT};
use artisan_core::error::CoreError;
use artisan_core::gallery::{Gallery, GalleryState};
use artisan_core::types::DbId;
use artisan_db::models::product::{CreateProduct, Product, ProductListParams, UpdateProduct};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::query::LimitParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Product",
        id,
    })
}

async fn find_product(state: &AppState, id: DbId) -> AppResult<Product> {
    state.catalog.get_product(id).await?.ok_or_else(|| not_found(id))
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/products
///
/// List products filtered by `?categoryId=` (`all` or an id), `?search=`
/// and `?includeDeleted=`.
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> AppResult<impl IntoResponse> {
    let products = state.catalog.list_products(&params).await?;

    tracing::debug!(
        category = %params.category_id,
        search = params.search.as_deref().unwrap_or(""),
        count = products.len(),
        "Products listed"
    );

    Ok(Json(DataResponse { data: products }))
}

/// GET /api/v1/products/{id}
///
/// Soft-deleted products are still returned here.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let product = find_product(&state, id).await?;
    Ok(Json(DataResponse { data: product }))
}

/// POST /api/v1/products
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProduct>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let product = state.catalog.create_product(&input).await?;

    tracing::info!(
        product_id = product.id,
        name = %product.name,
        category_id = product.category_id,
        "Product created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// PUT /api/v1/products/{id}
///
/// Absent fields keep their current value.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let product = state
        .catalog
        .update_product(id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(product_id = id, "Product updated");

    Ok(Json(DataResponse { data: product }))
}

/// DELETE /api/v1/products/{id}
///
/// Soft delete: the product disappears from listings but keeps its row.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !state.catalog.soft_delete_product(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(product_id = id, "Product deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Detail page extras
// ---------------------------------------------------------------------------

/// GET /api/v1/products/{id}/related
///
/// Other visible products from the same category, in catalog order.
pub async fn related_products(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let product = find_product(&state, id).await?;

    let mut candidates = state
        .catalog
        .list_products(&ProductListParams {
            category_id: CategorySelection::Id(product.category_id),
            ..Default::default()
        })
        .await?;
    if !candidates.iter().any(|p| p.id == id) {
        candidates.insert(0, product);
    }

    let limit = params.limit.unwrap_or(DEFAULT_RELATED_LIMIT);
    let related: Vec<Product> = pick_related(&candidates, id, limit)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(DataResponse { data: related }))
}

/// Gallery payload for a product detail page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductGallery {
    pub product_id: DbId,
    pub images: Vec<String>,
    /// Where a fresh view starts.
    pub initial: GalleryState,
    pub auto_slide: bool,
    pub interval_ms: u64,
}

/// GET /api/v1/products/{id}/gallery
///
/// Image list for the detail gallery plus the configured auto-advance
/// settings. Auto-advance is reported off when there is only one image.
pub async fn product_gallery(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let product = find_product(&state, id).await?;

    let gallery = Gallery::new(product.gallery_images());
    let auto = state.config.gallery.auto_advance();

    let data = ProductGallery {
        product_id: product.id,
        initial: gallery.state(),
        auto_slide: auto.is_enabled() && gallery.len() > 1,
        interval_ms: auto.interval().as_millis() as u64,
        images: gallery.images().to_vec(),
    };

    Ok(Json(DataResponse { data }))
}
