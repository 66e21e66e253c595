#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use artisan_api::config::{GalleryConfig, ServerConfig};
use artisan_api::router::build_app_router;
use artisan_api::state::AppState;
use artisan_core::contact::ContactForm;
use artisan_db::repositories::FixtureCatalog;
use artisan_events::{ContactSink, CrmError, LogContactSink, ToastBus};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and no external services.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: None,
        gallery: GalleryConfig::default(),
        recaptcha_secret: None,
        brevo_api_key: None,
    }
}

/// State over a freshly seeded fixture catalog with a log-only CRM sink.
pub fn test_state() -> AppState {
    AppState {
        catalog: Arc::new(FixtureCatalog::seeded()),
        config: Arc::new(test_config()),
        toasts: Arc::new(ToastBus::new()),
        contact_sink: Arc::new(LogContactSink),
        recaptcha: None,
    }
}

/// Build the full application router over [`test_state`].
///
/// Uses the same middleware stack as `main.rs`. The router is cheap to
/// clone and every clone shares the same catalog, so a test can send
/// several requests against one store.
pub fn build_test_app() -> Router {
    build_test_app_with(test_state())
}

pub fn build_test_app_with(state: AppState) -> Router {
    let config = Arc::clone(&state.config);
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Contact sinks
// ---------------------------------------------------------------------------

/// Remembers every submission it accepts.
#[derive(Default)]
pub struct RecordingSink {
    pub received: Mutex<Vec<ContactForm>>,
}

#[async_trait]
impl ContactSink for RecordingSink {
    async fn submit(&self, form: &ContactForm) -> Result<(), CrmError> {
        self.received.lock().unwrap().push(form.clone());
        Ok(())
    }
}

/// Rejects every submission as if the CRM were down.
pub struct FailingSink;

#[async_trait]
impl ContactSink for FailingSink {
    async fn submit(&self, _form: &ContactForm) -> Result<(), CrmError> {
        Err(CrmError::HttpStatus(503))
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, json: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(json)).await
}

pub async fn put_json(app: &Router, uri: &str, json: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(json)).await
}

pub async fn delete(app: &Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Ids of the products in a `{ "data": [...] }` listing.
pub fn ids(json: &serde_json::Value) -> Vec<i64> {
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect()
}
