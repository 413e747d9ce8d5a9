use std::time::Duration;

use crate::{CrawlUrlsQuery, JobId};

/// Work the controller asks its host to perform. Every effect that reaches
/// the network answers with exactly one [`crate::Msg`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchJobs { query: CrawlUrlsQuery },
    /// Fire `Msg::SearchDebounceElapsed { revision }` after `delay`,
    /// cancelling any previously scheduled firing.
    ScheduleSearch { revision: u64, delay: Duration },
    AddUrl { url: String },
    StartCrawls { ids: Vec<JobId> },
    DeleteUrls { ids: Vec<JobId> },
    RecrawlUrls { ids: Vec<JobId> },
    FetchDetails { id: JobId },
    FetchStats,
    Logout,
    NavigateToLogin,
}
