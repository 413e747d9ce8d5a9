use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("URL is required")]
    Empty,
    #[error("Please enter a valid HTTP or HTTPS URL")]
    InvalidUrl,
}

/// Check a user-entered URL before it is submitted; returns the trimmed form.
pub fn validate_submission_url(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    let parsed = Url::parse(trimmed).map_err(|_| ValidationError::InvalidUrl)?;
    match parsed.scheme() {
        "http" | "https" if parsed.has_host() => Ok(trimmed.to_string()),
        _ => Err(ValidationError::InvalidUrl),
    }
}
