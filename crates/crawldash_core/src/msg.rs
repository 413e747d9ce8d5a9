use crate::{BulkAction, BulkReport, CrawlJob, CrawlStats, JobId, RequestFailure, SortField};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Dashboard became visible; triggers the initial fetch.
    Mounted,
    /// Session token was set (login, restore) or dropped.
    SessionChanged { authenticated: bool },
    /// User asked for a manual refresh.
    RefreshRequested,
    /// User edited the search box.
    SearchChanged(String),
    /// Debounce timer fired for the given search revision.
    SearchDebounceElapsed { revision: u64 },
    /// Result of a list fetch.
    JobsLoaded(Result<Vec<CrawlJob>, RequestFailure>),
    AddFormOpened,
    AddFormCancelled,
    /// User submitted the add-URL form.
    AddUrlSubmitted(String),
    UrlAdded(Result<CrawlJob, RequestFailure>),
    BulkActionRequested(BulkAction),
    BulkActionFinished { action: BulkAction, report: BulkReport },
    SortClicked(SortField),
    SelectAllToggled(bool),
    RowToggled { id: JobId, checked: bool },
    DetailsRequested(JobId),
    DetailsLoaded(Result<CrawlJob, RequestFailure>),
    DetailsClosed,
    StatsRequested,
    StatsLoaded(Result<CrawlStats, RequestFailure>),
    LogoutClicked,
}
