use chrono::{DateTime, Utc};

pub type JobId = String;

/// Crawl state of a submitted URL.
///
/// The backend and older presentation code use overlapping vocabularies;
/// [`JobStatus::from_wire`] folds them into these four states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JobStatus {
    #[default]
    Queued,
    Running,
    Completed,
    Error,
}

impl JobStatus {
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "running" => JobStatus::Running,
            "completed" => JobStatus::Completed,
            "error" | "failed" => JobStatus::Error,
            // "queued", "pending", "stopped" and anything unknown
            _ => JobStatus::Queued,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeadingCounts {
    pub h1: u32,
    pub h2: u32,
    pub h3: u32,
    pub h4: u32,
    pub h5: u32,
    pub h6: u32,
}

impl HeadingCounts {
    /// Count for heading level `1..=6`; other levels have no headings.
    pub fn level(&self, level: u8) -> u32 {
        match level {
            1 => self.h1,
            2 => self.h2,
            3 => self.h3,
            4 => self.h4,
            5 => self.h5,
            6 => self.h6,
            _ => 0,
        }
    }

    pub fn total(&self) -> u32 {
        (1..=6).map(|level| self.level(level)).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLinkDetail {
    pub id: String,
    pub url: String,
    pub status_code: u16,
    pub error: Option<String>,
}

/// Client-side view of one crawled URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlJob {
    pub id: JobId,
    pub url: String,
    pub title: String,
    pub html_version: String,
    pub status: JobStatus,
    pub internal_links: u32,
    pub external_links: u32,
    pub broken_links: u32,
    pub has_login_form: bool,
    pub heading_counts: HeadingCounts,
    /// Present only once the detail record has been fetched.
    pub broken_link_details: Option<Vec<BrokenLinkDetail>>,
    pub created_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Milliseconds between creation and last crawl; never taken from the wire.
    pub duration: Option<i64>,
    pub error: Option<String>,
}

impl CrawlJob {
    /// Case-insensitive substring match against url and title.
    pub fn matches_search(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        self.url.to_lowercase().contains(&needle) || self.title.to_lowercase().contains(&needle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CrawlUrlsPage {
    pub jobs: Vec<CrawlJob>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(default)]
pub struct CrawlStats {
    pub total_urls: u64,
    pub queued_urls: u64,
    pub running_urls: u64,
    pub completed_urls: u64,
    pub error_urls: u64,
}
