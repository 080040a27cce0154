//! DTOs for the shorten endpoint.

use serde::Deserialize;
use validator::{Validate, ValidationError};

pub use crate::application::services::ShortenedLink as ShortenResultItem;

/// Request to shorten one or more URLs.
///
/// `urls` is a single string with URLs separated by newlines or commas.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(max = 65536, message = "urls payload is too large"))]
    pub urls: String,

    /// Optional password; an empty string means no password.
    #[validate(length(max = 128), custom(function = "validate_password"))]
    pub password: Option<String>,
}

impl ShortenRequest {
    /// Password with the empty string normalized to `None`.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

/// Rejects characters that would break key parsing or routing.
fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.contains(['$', '/']) {
        let mut err = ValidationError::new("password_charset");
        err.message = Some("password must not contain '$' or '/'".into());
        return Err(err);
    }
    Ok(())
}
