//! Request and response bodies for the authentication and crawler endpoints.
use crawldash_core::wire::{wire_id, BackendCrawlUrl};
use crawldash_core::CrawlJob;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateUserRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AddUrlRequest<'a> {
    pub url: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct BulkAddUrlsRequest<'a> {
    pub urls: &'a [String],
}

/// Numeric ids go back to the backend as JSON numbers.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub(crate) enum WireId<'a> {
    Number(i64),
    Text(&'a str),
}

impl<'a> From<&'a str> for WireId<'a> {
    fn from(id: &'a str) -> Self {
        id.parse().map(WireId::Number).unwrap_or(WireId::Text(id))
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct IdsRequest<'a> {
    pub ids: Vec<WireId<'a>>,
}

impl<'a> IdsRequest<'a> {
    pub fn new(ids: &'a [String]) -> Self {
        Self {
            ids: ids.iter().map(|id| WireId::from(id.as_str())).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    #[serde(deserialize_with = "wire_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Outcome of `POST /users`. The backend may answer with `{token, user}` or
/// with `{data, message}`; either way no session is started.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Registration {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RegisterResponse {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
    pub data: Option<UserProfile>,
    pub message: Option<String>,
}

impl From<RegisterResponse> for Registration {
    fn from(response: RegisterResponse) -> Self {
        Self {
            token: response.token.filter(|t| !t.is_empty()),
            user: response.user.or(response.data),
            message: response.message,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BulkAddResponse {
    pub data: Option<Vec<BackendCrawlUrl>>,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BulkAddOutcome {
    pub jobs: Vec<CrawlJob>,
    pub message: Option<String>,
    /// Per-URL rejections reported by the backend.
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct MessageResponse {
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}
