pub mod categories;
pub mod contact;
pub mod health;
pub mod products;
pub mod toasts;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /products                     list (?categoryId, search, includeDeleted), create
/// /products/{id}                get, update, soft delete
/// /products/{id}/related        same-category products (?limit)
/// /products/{id}/gallery        detail images and auto-advance settings
///
/// /categories                   list (?includeDeleted), create
/// /categories/{id}              get, update, soft delete
///
/// /contact                      submit the contact form (POST)
///
/// /toasts                       visitor toast stream (SSE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .nest("/categories", categories::router())
        .nest("/contact", contact::router())
        .nest("/toasts", toasts::router())
}
