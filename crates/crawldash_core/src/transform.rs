use chrono::{DateTime, Utc};

use crate::wire::{BackendBrokenLink, BackendCrawlResult, BackendCrawlUrl, BackendCrawlUrlList};
use crate::{BrokenLinkDetail, CrawlJob, CrawlUrlsPage, HeadingCounts, JobStatus, Pagination};

/// Map a backend crawl record into a [`CrawlJob`].
///
/// Pure and total: absent counts become 0, absent strings become empty,
/// unparseable timestamps become `None`. `duration` is derived from the two
/// timestamps and is not clamped, so an inverted pair yields a negative value.
pub fn transform_crawl_url(record: &BackendCrawlUrl) -> CrawlJob {
    let created_at = record.created_at.as_deref().and_then(parse_timestamp);
    let completed_at = record.last_crawled_at.as_deref().and_then(parse_timestamp);
    let duration = match (created_at, completed_at) {
        (Some(created), Some(completed)) => Some((completed - created).num_milliseconds()),
        _ => None,
    };

    CrawlJob {
        id: record.id.clone(),
        url: record.url.clone(),
        title: record.title.clone().unwrap_or_default(),
        html_version: record.html_version.clone().unwrap_or_default(),
        status: record
            .status
            .as_deref()
            .map(JobStatus::from_wire)
            .unwrap_or_default(),
        internal_links: record.internal_links_count.unwrap_or(0),
        external_links: record.external_links_count.unwrap_or(0),
        broken_links: record.inaccessible_links_count.unwrap_or(0),
        has_login_form: record.has_login_form.unwrap_or(false),
        heading_counts: HeadingCounts {
            h1: record.h1_count.unwrap_or(0),
            h2: record.h2_count.unwrap_or(0),
            h3: record.h3_count.unwrap_or(0),
            h4: record.h4_count.unwrap_or(0),
            h5: record.h5_count.unwrap_or(0),
            h6: record.h6_count.unwrap_or(0),
        },
        broken_link_details: None,
        created_at,
        completed_at,
        duration,
        error: non_empty(record.error_message.as_deref()),
    }
}

/// [`transform_crawl_url`] plus the broken-link details, in backend order.
pub fn transform_crawl_result(result: &BackendCrawlResult) -> CrawlJob {
    let mut job = transform_crawl_url(&result.crawl_url);
    let details = result
        .broken_links
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(transform_broken_link)
        .collect();
    job.broken_link_details = Some(details);
    job
}

pub fn transform_crawl_url_list(list: &BackendCrawlUrlList) -> CrawlUrlsPage {
    let jobs = list
        .data
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(transform_crawl_url)
        .collect();
    CrawlUrlsPage {
        jobs,
        pagination: Pagination {
            page: list.pagination.page,
            limit: list.pagination.limit,
            total: list.pagination.total,
            pages: list.pagination.pages,
        },
    }
}

fn transform_broken_link(link: &BackendBrokenLink) -> BrokenLinkDetail {
    BrokenLinkDetail {
        id: link.id.clone(),
        url: link.url.clone(),
        status_code: link.status_code.unwrap_or(0),
        error: non_empty(link.error_message.as_deref()),
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.filter(|s| !s.is_empty()).map(ToOwned::to_owned)
}
