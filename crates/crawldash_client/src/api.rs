use std::sync::Arc;

use async_trait::async_trait;
use crawldash_core::wire::{
    BackendCrawlResult, BackendCrawlUrl, BackendCrawlUrlList, Envelope,
};
use crawldash_core::{
    transform_crawl_result, transform_crawl_url, transform_crawl_url_list, validate_submission_url,
    CrawlJob, CrawlStats, CrawlUrlsPage, CrawlUrlsQuery, JobId,
};
use crawldash_logging::{dash_debug, dash_info, dash_warn};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::map_reqwest_error;
use crate::types::{
    AddUrlRequest, BulkAddResponse, BulkAddUrlsRequest, CreateUserRequest, ErrorBody, IdsRequest,
    LoginRequest, MessageResponse, RegisterResponse,
};
use crate::{ApiError, BulkAddOutcome, ClientSettings, LoginResponse, Registration, Session};

const GENERIC_REQUEST_FAILURE: &str = "Request failed";
const GENERIC_LOGIN_FAILURE: &str = "Login failed";
const GENERIC_REGISTER_FAILURE: &str = "Registration failed";

/// Crawler operations the dashboard drives. [`ApiClient`] is the HTTP
/// implementation; tests substitute their own.
#[async_trait]
pub trait CrawlerBackend: Send + Sync {
    async fn add_url(&self, url: &str) -> Result<CrawlJob, ApiError>;
    async fn bulk_add_urls(&self, urls: &[String]) -> Result<BulkAddOutcome, ApiError>;
    async fn get_crawl_urls(&self, query: &CrawlUrlsQuery) -> Result<CrawlUrlsPage, ApiError>;
    async fn get_crawl_result(&self, id: &str) -> Result<CrawlJob, ApiError>;
    async fn start_crawl(&self, id: &str) -> Result<(), ApiError>;
    async fn delete_urls(&self, ids: &[JobId]) -> Result<(), ApiError>;
    async fn recrawl_urls(&self, ids: &[JobId]) -> Result<(), ApiError>;
    async fn get_stats(&self) -> Result<CrawlStats, ApiError>;
    /// Drop the session. Never touches the network.
    fn logout(&self);
    fn is_authenticated(&self) -> bool;
}

/// Single choke point for calls to the crawler service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<Session>,
}

impl ApiClient {
    pub fn new(settings: &ClientSettings, session: Arc<Session>) -> Result<Self, ApiError> {
        let base_url = Url::parse(settings.base_url.trim_end_matches('/')).map_err(|err| {
            ApiError::Transport(format!("invalid base url {}: {err}", settings.base_url))
        })?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(map_reqwest_error)?;
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Authenticate and start a session with the returned token.
    ///
    /// On failure the session is left untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let builder = self
            .unauthenticated(Method::POST, &["login"])?
            .json(&LoginRequest { email, password });
        let response = builder.send().await.map_err(map_reqwest_error)?;
        if !response.status().is_success() {
            return Err(failure_from(response, GENERIC_LOGIN_FAILURE).await);
        }
        let body: LoginResponse = decode(response).await?;
        self.session.set_token(&body.token);
        dash_info!("Logged in as user {}", body.user.id);
        Ok(body)
    }

    /// Create an account. Does not start a session; the caller decides what
    /// to do with any returned token.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Registration, ApiError> {
        let builder = self
            .unauthenticated(Method::POST, &["users"])?
            .json(&CreateUserRequest {
                name,
                email,
                password,
            });
        let response = builder.send().await.map_err(map_reqwest_error)?;
        if !response.status().is_success() {
            return Err(failure_from(response, GENERIC_REGISTER_FAILURE).await);
        }
        let body: RegisterResponse = decode(response).await?;
        Ok(body.into())
    }

    pub fn logout(&self) {
        self.session.clear();
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Send a request and decode its JSON body.
    ///
    /// A 401 clears the session and short-circuits before the body is read.
    pub async fn request<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            dash_warn!("Request to {} rejected with 401; clearing session", response.url().path());
            self.session.clear();
            return Err(ApiError::AuthenticationRequired);
        }
        if !status.is_success() {
            return Err(failure_from(response, GENERIC_REQUEST_FAILURE).await);
        }
        decode(response).await
    }

    fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport(format!("base url {} cannot hold a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(key, value)| (*key, value.as_str())));
        }
        Ok(url)
    }

    fn unauthenticated(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(segments, &[])?;
        Ok(self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json")))
    }

    fn authenticated(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(segments, query)?;
        dash_debug!("{} {}", method, url);
        let mut builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }
}

#[async_trait]
impl CrawlerBackend for ApiClient {
    async fn add_url(&self, url: &str) -> Result<CrawlJob, ApiError> {
        let url = validate_submission_url(url)?;
        let builder = self
            .authenticated(Method::POST, &["crawler", "urls"], &[])?
            .json(&AddUrlRequest { url: &url });
        let created: Envelope<BackendCrawlUrl> = self.request(builder).await?;
        Ok(transform_crawl_url(&created.into_inner()))
    }

    async fn bulk_add_urls(&self, urls: &[String]) -> Result<BulkAddOutcome, ApiError> {
        let builder = self
            .authenticated(Method::POST, &["crawler", "urls", "bulk"], &[])?
            .json(&BulkAddUrlsRequest { urls });
        let body: BulkAddResponse = self.request(builder).await?;
        Ok(BulkAddOutcome {
            jobs: body
                .data
                .unwrap_or_default()
                .iter()
                .map(transform_crawl_url)
                .collect(),
            message: body.message,
            errors: body.errors.unwrap_or_default(),
        })
    }

    async fn get_crawl_urls(&self, query: &CrawlUrlsQuery) -> Result<CrawlUrlsPage, ApiError> {
        let builder = self.authenticated(Method::GET, &["crawler", "urls"], &query.pairs())?;
        let list: BackendCrawlUrlList = self.request(builder).await?;
        Ok(transform_crawl_url_list(&list))
    }

    async fn get_crawl_result(&self, id: &str) -> Result<CrawlJob, ApiError> {
        let builder = self.authenticated(Method::GET, &["crawler", "urls", id], &[])?;
        let result: Envelope<BackendCrawlResult> = self.request(builder).await?;
        Ok(transform_crawl_result(&result.into_inner()))
    }

    async fn start_crawl(&self, id: &str) -> Result<(), ApiError> {
        let builder = self.authenticated(Method::POST, &["crawler", "urls", id, "crawl"], &[])?;
        let body: MessageResponse = self.request(builder).await?;
        dash_debug!("Start crawl {}: {:?}", id, body.message);
        Ok(())
    }

    async fn delete_urls(&self, ids: &[JobId]) -> Result<(), ApiError> {
        let builder = self
            .authenticated(Method::DELETE, &["crawler", "urls"], &[])?
            .json(&IdsRequest::new(ids));
        let body: MessageResponse = self.request(builder).await?;
        dash_debug!("Delete {} urls: {:?}", ids.len(), body.message);
        Ok(())
    }

    async fn recrawl_urls(&self, ids: &[JobId]) -> Result<(), ApiError> {
        let builder = self
            .authenticated(Method::POST, &["crawler", "urls", "recrawl"], &[])?
            .json(&IdsRequest::new(ids));
        let body: MessageResponse = self.request(builder).await?;
        dash_debug!("Re-crawl {} urls: {:?}", ids.len(), body.message);
        Ok(())
    }

    async fn get_stats(&self) -> Result<CrawlStats, ApiError> {
        let builder = self.authenticated(Method::GET, &["crawler", "stats"], &[])?;
        let stats: Envelope<CrawlStats> = self.request(builder).await?;
        Ok(stats.into_inner())
    }

    fn logout(&self) {
        ApiClient::logout(self);
    }

    fn is_authenticated(&self) -> bool {
        ApiClient::is_authenticated(self)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(map_reqwest_error)
}

/// Build a failure from an error body's `error` field, or `fallback`.
async fn failure_from(response: Response, fallback: &str) -> ApiError {
    let status = response.status().as_u16();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| fallback.to_string());
    ApiError::RequestFailed { status, message }
}
