//! Contact form payload and validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

/// Maximum length of the email and name fields (matches the `contacts` table).
pub const MAX_FIELD_LEN: u64 = 100;

/// Maximum length of a contact message.
pub const MAX_MESSAGE_LEN: u64 = 5000;

/// Message returned to the visitor after a successful submission.
pub const SUBMITTED_MESSAGE: &str = "Form submitted successfully";

/// A contact form submission as posted by the site.
///
/// Missing fields deserialize as empty strings so they surface as
/// validation failures instead of body-parsing errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    #[serde(default)]
    #[validate(email, length(max = MAX_FIELD_LEN))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, max = MAX_FIELD_LEN))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(min = 1, max = MAX_FIELD_LEN))]
    pub last_name: String,

    #[serde(default)]
    #[validate(length(min = 1, max = MAX_MESSAGE_LEN))]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recaptcha_token: Option<String>,
}

impl ContactForm {
    /// Copy with surrounding whitespace stripped from every text field.
    pub fn trimmed(&self) -> Self {
        Self {
            email: self.email.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            message: self.message.trim().to_string(),
            recaptcha_token: self
                .recaptcha_token
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
        }
    }

    /// Trim and validate, naming every offending field in the error.
    pub fn into_validated(self) -> Result<Self, CoreError> {
        let form = self.trimmed();
        match form.validate() {
            Ok(()) => Ok(form),
            Err(errors) => {
                let mut fields: Vec<String> = errors
                    .field_errors()
                    .keys()
                    .map(|field| field.to_string())
                    .collect();
                fields.sort();
                Err(CoreError::Validation(format!(
                    "Invalid or missing contact fields: {}",
                    fields.join(", ")
                )))
            }
        }
    }
}
