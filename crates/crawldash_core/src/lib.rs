//! Crawl dashboard core: data model, backend record transformation and the
//! pure dashboard state machine.
mod effect;
mod job;
mod msg;
mod outcome;
mod state;
pub mod table;
mod transform;
mod update;
mod validate;
mod view_model;
pub mod wire;

pub use effect::Effect;
pub use job::{
    BrokenLinkDetail, CrawlJob, CrawlStats, CrawlUrlsPage, HeadingCounts, JobId, JobStatus,
    Pagination,
};
pub use msg::Msg;
pub use outcome::{BulkAction, BulkReport, ItemOutcome, RequestFailure};
pub use state::DashboardState;
pub use table::{Selection, SortDirection, SortField, SortState};
pub use transform::{transform_crawl_result, transform_crawl_url, transform_crawl_url_list};
pub use update::{update, FETCH_LIMIT, FETCH_PAGE, SEARCH_DEBOUNCE};
pub use validate::{validate_submission_url, ValidationError};
pub use view_model::{DashboardView, JobRowView};
pub use wire::CrawlUrlsQuery;
