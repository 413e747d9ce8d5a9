//! Backend representation of crawl records, as served under `/api/crawler`.
//!
//! Field names follow the backend's snake-case vocabulary. Only `id` and `url`
//! are required; everything else may be absent or `null`.
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BackendCrawlUrl {
    #[serde(deserialize_with = "wire_id")]
    pub id: String,
    pub url: String,
    pub status: Option<String>,
    pub title: Option<String>,
    pub html_version: Option<String>,
    pub h1_count: Option<u32>,
    pub h2_count: Option<u32>,
    pub h3_count: Option<u32>,
    pub h4_count: Option<u32>,
    pub h5_count: Option<u32>,
    pub h6_count: Option<u32>,
    pub internal_links_count: Option<u32>,
    pub external_links_count: Option<u32>,
    pub inaccessible_links_count: Option<u32>,
    pub has_login_form: Option<bool>,
    pub error_message: Option<String>,
    pub last_crawled_at: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BackendBrokenLink {
    #[serde(deserialize_with = "wire_id")]
    pub id: String,
    pub url: String,
    pub status_code: Option<u16>,
    pub error_message: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BackendCrawlResult {
    pub crawl_url: BackendCrawlUrl,
    pub broken_links: Option<Vec<BackendBrokenLink>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct BackendPagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    #[serde(alias = "totalPages")]
    pub pages: u64,
}

/// Body of `GET /crawler/urls`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BackendCrawlUrlList {
    pub data: Option<Vec<BackendCrawlUrl>>,
    #[serde(default)]
    pub pagination: BackendPagination,
}

/// Some endpoints wrap their payload as `{ "data": ... }`, others return it bare.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(inner) => inner,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

/// Backend ids are integers; the client keys records by their string form.
pub fn wire_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

/// Query for `GET /crawler/urls`. Unset or zero/empty parameters are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CrawlUrlsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<String>,
    pub search: Option<String>,
}

impl CrawlUrlsQuery {
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(page) = self.page.filter(|p| *p > 0) {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("status", status.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        pairs
    }
}
