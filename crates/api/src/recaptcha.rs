//! reCAPTCHA token verification for the contact form.

use std::time::Duration;

use serde::Deserialize;

use crate::error::AppError;

/// Google's verification endpoint.
pub const RECAPTCHA_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// HTTP request timeout for a single verification.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum RecaptchaError {
    /// A secret is configured but the submission carried no token.
    #[error("reCAPTCHA token is missing")]
    MissingToken,

    /// Google answered and said no.
    #[error("reCAPTCHA verification failed: {}", .0.join(", "))]
    Rejected(Vec<String>),

    /// The verification request itself failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl From<RecaptchaError> for AppError {
    fn from(err: RecaptchaError) -> Self {
        match err {
            RecaptchaError::MissingToken | RecaptchaError::Rejected(_) => {
                AppError::BadRequest("reCAPTCHA verification failed".to_string())
            }
            RecaptchaError::Request(e) => AppError::Upstream(format!("reCAPTCHA: {e}")),
        }
    }
}

/// Body of a `siteverify` response.
#[derive(Debug, Deserialize)]
pub struct VerifyResponse {
    pub success: bool,
    #[serde(default, rename = "error-codes")]
    pub error_codes: Vec<String>,
}

impl VerifyResponse {
    fn into_result(self) -> Result<(), RecaptchaError> {
        if self.success {
            Ok(())
        } else {
            Err(RecaptchaError::Rejected(self.error_codes))
        }
    }
}

// ---------------------------------------------------------------------------
// RecaptchaVerifier
// ---------------------------------------------------------------------------

/// Checks visitor tokens against the reCAPTCHA API using a server secret.
pub struct RecaptchaVerifier {
    client: reqwest::Client,
    secret: String,
    verify_url: String,
}

impl RecaptchaVerifier {
    pub fn new(secret: impl Into<String>) -> Result<Self, RecaptchaError> {
        Self::with_verify_url(secret, RECAPTCHA_VERIFY_URL)
    }

    pub fn with_verify_url(
        secret: impl Into<String>,
        verify_url: impl Into<String>,
    ) -> Result<Self, RecaptchaError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            secret: secret.into(),
            verify_url: verify_url.into(),
        })
    }

    /// Verify a visitor token. A missing token fails without a network call.
    pub async fn verify(&self, token: Option<&str>) -> Result<(), RecaptchaError> {
        let token = token.ok_or(RecaptchaError::MissingToken)?;

        let response: VerifyResponse = self
            .client
            .post(&self.verify_url)
            .form(&[("secret", self.secret.as_str()), ("response", token)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let result = response.into_result();
        if let Err(ref e) = result {
            tracing::warn!(error = %e, "reCAPTCHA rejected contact submission");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn missing_token_fails_without_network() {
        let verifier = RecaptchaVerifier::with_verify_url("secret", "http://127.0.0.1:9").unwrap();
        assert_matches!(verifier.verify(None).await, Err(RecaptchaError::MissingToken));
    }

    #[test]
    fn parses_rejection_codes() {
        let response: VerifyResponse = serde_json::from_str(
            r#"{"success": false, "error-codes": ["invalid-input-response"]}"#,
        )
        .unwrap();
        assert_matches!(
            response.into_result(),
            Err(RecaptchaError::Rejected(codes)) if codes == ["invalid-input-response"]
        );
    }

    #[test]
    fn success_without_codes_is_ok() {
        let response: VerifyResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_matches!(response.into_result(), Ok(()));
    }

    #[test]
    fn rejection_maps_to_bad_request() {
        let err: AppError = RecaptchaError::Rejected(vec![]).into();
        assert_matches!(err, AppError::BadRequest(_));
    }
}
