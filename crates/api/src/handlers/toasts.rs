//! Server-sent stream of visitor toasts.

use artisan_events::Toast;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};

use crate::state::AppState;

/// SSE event name every toast frame is sent under.
pub const TOAST_EVENT: &str = "toast";

/// GET /api/v1/toasts
///
/// Subscribes to the toast bus and forwards each [`Toast`] as a JSON `toast`
/// event. Only toasts published after the subscription are delivered. A
/// client that falls behind skips the toasts it missed.
pub async fn stream_toasts(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let toasts = BroadcastStream::new(state.toasts.subscribe()).filter_map(|item| match item {
        Ok(toast) => Some(toast_event(&toast)),
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!(skipped, "Toast stream lagged");
            None
        }
    });

    tracing::debug!("Toast stream opened");

    Sse::new(toasts).keep_alive(KeepAlive::default())
}

fn toast_event(toast: &Toast) -> Result<Event, axum::Error> {
    Event::default().event(TOAST_EVENT).json_data(toast)
}
