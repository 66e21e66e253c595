//! Contact form submission.

use artisan_core::contact::{ContactForm, SUBMITTED_MESSAGE};
use artisan_events::Toast;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Body returned after a successful submission.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: &'static str,
}

/// POST /api/v1/contact
///
/// Validates the form, checks the reCAPTCHA token when a secret is
/// configured, and forwards the contact to the CRM. The outcome is also
/// pushed to the visitor as a toast over `GET /api/v1/toasts`.
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> AppResult<impl IntoResponse> {
    let form = form.into_validated()?;

    if let Some(recaptcha) = &state.recaptcha {
        recaptcha.verify(form.recaptcha_token.as_deref()).await?;
    }

    if let Err(e) = state.contact_sink.submit(&form).await {
        state.toasts.publish(Toast::error("Error sending form"));
        return Err(AppError::Upstream(format!("CRM delivery failed: {e}")));
    }

    tracing::info!(email = %form.email, "Contact form submitted");
    state.toasts.publish(Toast::success(SUBMITTED_MESSAGE));

    Ok(Json(ContactResponse {
        success: true,
        message: SUBMITTED_MESSAGE,
    }))
}
