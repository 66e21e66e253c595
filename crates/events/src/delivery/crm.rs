//! Forwarding contact-form submissions to a CRM.
//!
//! [`ContactSink`] is the seam; [`BrevoContactSink`] posts the contact to
//! the Brevo contacts API, [`LogContactSink`] only writes a log line and is
//! used when no API key is configured.

use std::time::Duration;

use async_trait::async_trait;
use artisan_core::contact::ContactForm;

/// Public Brevo API endpoint.
pub const BREVO_BASE_URL: &str = "https://api.brevo.com";

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for CRM delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum CrmError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The CRM returned a non-2xx status code.
    #[error("CRM returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// ContactSink
// ---------------------------------------------------------------------------

/// Destination for validated contact submissions.
#[async_trait]
pub trait ContactSink: Send + Sync {
    async fn submit(&self, form: &ContactForm) -> Result<(), CrmError>;
}

/// Sink that records the submission in the log and nothing else.
#[derive(Debug, Default)]
pub struct LogContactSink;

#[async_trait]
impl ContactSink for LogContactSink {
    async fn submit(&self, form: &ContactForm) -> Result<(), CrmError> {
        tracing::info!(
            email = %form.email,
            first_name = %form.first_name,
            last_name = %form.last_name,
            "Contact received (no CRM configured)"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Brevo
// ---------------------------------------------------------------------------

/// Request body for `POST /v3/contacts`.
pub fn brevo_payload(form: &ContactForm) -> serde_json::Value {
    serde_json::json!({
        "email": form.email,
        "attributes": {
            "FIRSTNAME": form.first_name,
            "LASTNAME": form.last_name,
            "MESSAGE": form.message,
        },
        "updateEnabled": true,
    })
}

/// Creates or updates the contact in Brevo.
pub struct BrevoContactSink {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl BrevoContactSink {
    /// Sink against the public Brevo API.
    pub fn new(api_key: impl Into<String>) -> Result<Self, CrmError> {
        Self::with_base_url(api_key, BREVO_BASE_URL)
    }

    /// Sink against an alternative base URL (a proxy or a local stub).
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, CrmError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn contacts_url(&self) -> String {
        format!("{}/v3/contacts", self.base_url)
    }
}

#[async_trait]
impl ContactSink for BrevoContactSink {
    async fn submit(&self, form: &ContactForm) -> Result<(), CrmError> {
        let response = self
            .client
            .post(self.contacts_url())
            .header("api-key", &self.api_key)
            .json(&brevo_payload(form))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            tracing::error!(status, email = %form.email, "Brevo rejected contact");
            return Err(CrmError::HttpStatus(status));
        }

        tracing::info!(email = %form.email, "Contact forwarded to Brevo");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
