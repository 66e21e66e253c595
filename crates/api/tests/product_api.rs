//! HTTP-level integration tests for the product endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener. Every test starts from the seeded
//! fixture catalog: 12 products, product `n` in category `(n - 1) % 4 + 1`.

mod common;

use std::sync::Arc;
use std::time::Duration;

use artisan_api::config::{GalleryConfig, ServerConfig};
use axum::http::StatusCode;
use common::{body_json, delete, get, ids, post_json, put_json};

// ---------------------------------------------------------------------------
// Listing and filtering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_without_filters_returns_all_in_id_order() {
    let app = common::build_test_app();
    let response = get(&app, "/api/v1/products").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(ids(&json), (1..=12).collect::<Vec<_>>());
    assert_eq!(json["data"][0]["name"], "Producto Artesanal 1");
    assert_eq!(json["data"][0]["category"]["name"], "Cerámica");
}

#[tokio::test]
async fn category_filter_keeps_only_that_category() {
    let app = common::build_test_app();
    let json = body_json(get(&app, "/api/v1/products?categoryId=2").await).await;

    assert_eq!(ids(&json), vec![2, 6, 10]);
}

#[tokio::test]
async fn category_all_is_the_same_as_no_filter() {
    let app = common::build_test_app();
    let all = body_json(get(&app, "/api/v1/products?categoryId=all").await).await;
    let none = body_json(get(&app, "/api/v1/products").await).await;

    assert_eq!(ids(&all), ids(&none));
}

#[tokio::test]
async fn search_is_case_insensitive_and_combines_with_category() {
    let app = common::build_test_app();
    let json = body_json(get(&app, "/api/v1/products?categoryId=2&search=ARTESANAL%201").await).await;

    assert_eq!(ids(&json), vec![10]);
}

#[tokio::test]
async fn search_matches_short_description() {
    let app = common::build_test_app();
    let json = body_json(get(&app, "/api/v1/products?search=breve%20descripci%C3%B3n").await).await;

    assert_eq!(ids(&json).len(), 12);
}

#[tokio::test]
async fn unknown_category_yields_empty_list() {
    let app = common::build_test_app();
    let json = body_json(get(&app, "/api/v1/products?categoryId=99").await).await;

    assert!(ids(&json).is_empty());
}

#[tokio::test]
async fn malformed_category_is_rejected() {
    let app = common::build_test_app();
    let response = get(&app, "/api/v1/products?categoryId=ceramics").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_product_by_id() {
    let app = common::build_test_app();
    let response = get(&app, "/api/v1/products/5").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Producto Artesanal 5");
    assert_eq!(json["data"]["categoryId"], 1);
    assert_eq!(json["data"]["imageUrl"], "/images/product-1.jpg");
}

#[tokio::test]
async fn get_nonexistent_product_returns_404() {
    let app = common::build_test_app();
    let response = get(&app, "/api/v1/products/999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn create_product_returns_201_and_lists_it() {
    let app = common::build_test_app();

    let response = post_json(
        &app,
        "/api/v1/products",
        serde_json::json!({
            "name": "Cuenco de barro",
            "shortDescription": "Cuenco torneado a mano",
            "price": 32.5,
            "imageUrl": "/images/product-1.jpg",
            "categoryId": 1,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], 13);
    assert_eq!(json["data"]["name"], "Cuenco de barro");

    let listed = body_json(get(&app, "/api/v1/products?categoryId=1").await).await;
    assert_eq!(ids(&listed), vec![1, 5, 9, 13]);
}

#[tokio::test]
async fn create_product_with_unknown_category_is_rejected() {
    let app = common::build_test_app();
    let response = post_json(
        &app,
        "/api/v1/products",
        serde_json::json!({"name": "Huérfano", "price": 10.0, "categoryId": 42}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn create_product_with_negative_price_is_rejected() {
    let app = common::build_test_app();
    let response = post_json(
        &app,
        "/api/v1/products",
        serde_json::json!({"name": "Gratis", "price": -1.0, "categoryId": 1}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("price"));
}

#[tokio::test]
async fn update_product_changes_only_given_fields() {
    let app = common::build_test_app();
    let response = put_json(
        &app,
        "/api/v1/products/3",
        serde_json::json!({"price": 49.0}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["price"], 49.0);
    assert_eq!(json["data"]["name"], "Producto Artesanal 3");
}

#[tokio::test]
async fn update_nonexistent_product_returns_404() {
    let app = common::build_test_app();
    let response = put_json(&app, "/api/v1/products/999", serde_json::json!({"name": "x"})).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn soft_delete_hides_product_from_listing() {
    let app = common::build_test_app();

    let response = delete(&app, "/api/v1/products/6").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let visible = body_json(get(&app, "/api/v1/products?categoryId=2").await).await;
    assert_eq!(ids(&visible), vec![2, 10]);

    let everything =
        body_json(get(&app, "/api/v1/products?categoryId=2&includeDeleted=true").await).await;
    assert_eq!(ids(&everything), vec![2, 6, 10]);

    // Detail lookups still find the deleted product.
    let detail = body_json(get(&app, "/api/v1/products/6").await).await;
    assert!(detail["data"]["deletedAt"].is_string());
}

#[tokio::test]
async fn delete_nonexistent_product_returns_404() {
    let app = common::build_test_app();
    let response = delete(&app, "/api/v1/products/999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Related products and gallery
// ---------------------------------------------------------------------------

#[tokio::test]
async fn related_products_share_the_category() {
    let app = common::build_test_app();
    let json = body_json(get(&app, "/api/v1/products/2/related").await).await;

    assert_eq!(ids(&json), vec![6, 10]);
}

#[tokio::test]
async fn related_products_respect_limit() {
    let app = common::build_test_app();
    let json = body_json(get(&app, "/api/v1/products/1/related?limit=1").await).await;

    assert_eq!(ids(&json), vec![5]);
}

#[tokio::test]
async fn related_products_of_missing_product_returns_404() {
    let app = common::build_test_app();
    let response = get(&app, "/api/v1/products/999/related").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn gallery_lists_main_image_then_detail_shots() {
    let app = common::build_test_app();
    let response = get(&app, "/api/v1/products/5/gallery").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(
        data["images"],
        serde_json::json!([
            "/images/product-1.jpg",
            "/images/product-detail-2-2.jpg",
            "/images/product-detail-2-3.jpg",
        ])
    );
    assert_eq!(data["initial"]["state"], "displaying");
    assert_eq!(data["initial"]["index"], 0);
    assert_eq!(data["autoSlide"], true);
    assert_eq!(data["intervalMs"], 3000);
}

#[tokio::test]
async fn gallery_reports_configured_auto_advance() {
    let mut state = common::test_state();
    state.config = Arc::new(ServerConfig {
        gallery: GalleryConfig {
            auto_slide: false,
            interval: Duration::from_millis(5000),
        },
        ..common::test_config()
    });
    let app = common::build_test_app_with(state);

    let json = body_json(get(&app, "/api/v1/products/1/gallery").await).await;
    assert_eq!(json["data"]["autoSlide"], false);
    assert_eq!(json["data"]["intervalMs"], 5000);
}
