use axum::routing::get;
use axum::Router;

use crate::handlers::toasts;
use crate::state::AppState;

/// Toast stream mounted at `/toasts`.
///
/// ```text
/// GET    /                  -> stream_toasts (text/event-stream)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(toasts::stream_toasts))
}
