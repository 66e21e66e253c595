use std::sync::Arc;

use artisan_db::repositories::CatalogRepository;
use artisan_events::{ContactSink, ToastBus};

use crate::config::ServerConfig;
use crate::recaptcha::RecaptchaVerifier;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Product and category store (PostgreSQL or the fixture catalog).
    pub catalog: Arc<dyn CatalogRepository>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Visitor-facing notifications, streamed to the site by `GET /api/v1/toasts`.
    pub toasts: Arc<ToastBus>,
    /// Where validated contact submissions go.
    pub contact_sink: Arc<dyn ContactSink>,
    /// Present only when a reCAPTCHA secret is configured.
    pub recaptcha: Option<Arc<RecaptchaVerifier>>,
}
