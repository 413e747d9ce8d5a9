use crawldash_core::{RequestFailure, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 401. The session token is cleared before this is returned.
    #[error("Authentication required")]
    AuthenticationRequired,
    #[error("{message}")]
    RequestFailed { status: u16, message: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("network error: {0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn to_failure(&self) -> RequestFailure {
        match self {
            ApiError::AuthenticationRequired => RequestFailure::AuthenticationRequired,
            other => RequestFailure::Failed(other.to_string()),
        }
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_decode() {
        return ApiError::Decode(err.to_string());
    }
    ApiError::Transport(err.to_string())
}
