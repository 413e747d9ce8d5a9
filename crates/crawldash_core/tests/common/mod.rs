#![allow(dead_code)]
use std::sync::Once;

use chrono::{TimeZone, Utc};
use crawldash_core::{CrawlJob, DashboardState, HeadingCounts, JobStatus, Msg};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(crawldash_logging::initialize_for_tests);
}

pub fn job(id: &str, url: &str, title: &str) -> CrawlJob {
    CrawlJob {
        id: id.to_string(),
        url: url.to_string(),
        title: title.to_string(),
        html_version: String::new(),
        status: JobStatus::Queued,
        internal_links: 0,
        external_links: 0,
        broken_links: 0,
        has_login_form: false,
        heading_counts: HeadingCounts::default(),
        broken_link_details: None,
        created_at: None,
        completed_at: None,
        duration: None,
        error: None,
    }
}

pub fn created_at_secs(mut job: CrawlJob, secs: i64) -> CrawlJob {
    job.created_at = Utc.timestamp_opt(secs, 0).single();
    job
}

/// Authenticated state holding `jobs`, with no fetch in flight.
pub fn loaded_state(jobs: Vec<CrawlJob>) -> DashboardState {
    let (state, _) = crawldash_core::update(
        DashboardState::with_session(true),
        Msg::JobsLoaded(Ok(jobs)),
    );
    state
}
