//! Route definitions for the product catalog, mounted at `/products`.

use axum::routing::get;
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// ```text
/// GET    /                  -> list_products
/// POST   /                  -> create_product
/// GET    /{id}              -> get_product
/// PUT    /{id}              -> update_product
/// DELETE /{id}              -> delete_product (soft)
/// GET    /{id}/related      -> related_products
/// GET    /{id}/gallery      -> product_gallery
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/{id}/related", get(products::related_products))
        .route("/{id}/gallery", get(products::product_gallery))
}
