use chrono::{DateTime, Utc};

use crate::table::SortState;
use crate::{CrawlJob, CrawlStats, JobId, JobStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardView {
    pub rows: Vec<JobRowView>,
    /// Jobs held before the client-side search filter.
    pub total_jobs: usize,
    pub search_term: String,
    pub selected_count: usize,
    pub all_selected: bool,
    pub loading: bool,
    pub sort: SortState,
    pub add_form_open: bool,
    pub add_form_error: Option<String>,
    pub detail: Option<CrawlJob>,
    pub stats: Option<CrawlStats>,
    pub needs_login: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub id: JobId,
    pub url: String,
    pub title: String,
    pub status: JobStatus,
    pub html_version: String,
    pub internal_links: u32,
    pub external_links: u32,
    pub broken_links: u32,
    pub created_at: Option<DateTime<Utc>>,
    pub selected: bool,
}

impl JobRowView {
    pub(crate) fn from_job(job: &CrawlJob, selected: bool) -> Self {
        Self {
            id: job.id.clone(),
            url: job.url.clone(),
            title: job.title.clone(),
            status: job.status,
            html_version: job.html_version.clone(),
            internal_links: job.internal_links,
            external_links: job.external_links,
            broken_links: job.broken_links,
            created_at: job.created_at,
            selected,
        }
    }
}
