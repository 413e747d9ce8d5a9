use std::time::Duration;

use crawldash_logging::{dash_debug, dash_error, dash_info, dash_warn};

use crate::{
    validate_submission_url, BulkAction, BulkReport, CrawlUrlsQuery, DashboardState, Effect, Msg,
    RequestFailure,
};

/// Quiet period after the last search keystroke before the list is re-fetched.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);
pub const FETCH_PAGE: u32 = 1;
pub const FETCH_LIMIT: u32 = 100;

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: DashboardState, msg: Msg) -> (DashboardState, Vec<Effect>) {
    let effects = match msg {
        // Responses to requests issued before logout belong to the old session.
        Msg::JobsLoaded(_) | Msg::DetailsLoaded(_) | Msg::StatsLoaded(_)
            if !state.is_authenticated() =>
        {
            dash_debug!("Dropping response that arrived without a session");
            state.set_loading(false);
            Vec::new()
        }
        Msg::Mounted | Msg::RefreshRequested => begin_fetch(&mut state),
        Msg::SessionChanged { authenticated } => {
            state.set_authenticated(authenticated);
            Vec::new()
        }
        Msg::SearchChanged(term) => {
            if term == state.search_term() {
                return (state, Vec::new());
            }
            let revision = state.set_search_term(term);
            vec![Effect::ScheduleSearch {
                revision,
                delay: SEARCH_DEBOUNCE,
            }]
        }
        Msg::SearchDebounceElapsed { revision } => {
            if revision != state.search_revision() {
                dash_debug!(
                    "Dropping stale search revision {} (current {})",
                    revision,
                    state.search_revision()
                );
                Vec::new()
            } else if state.is_loading() {
                // Refresh for this keystroke is dropped, not queued.
                dash_debug!("Search revision {} fired while loading; skipped", revision);
                Vec::new()
            } else {
                begin_fetch(&mut state)
            }
        }
        Msg::JobsLoaded(result) => {
            state.set_loading(false);
            match result {
                Ok(jobs) => {
                    dash_debug!("Loaded {} crawl jobs", jobs.len());
                    state.replace_jobs(jobs);
                    Vec::new()
                }
                Err(failure) => report_failure(&mut state, "fetch URLs", failure),
            }
        }
        Msg::AddFormOpened => {
            state.open_add_form();
            Vec::new()
        }
        Msg::AddFormCancelled => {
            state.close_add_form();
            Vec::new()
        }
        Msg::AddUrlSubmitted(raw) => match validate_submission_url(&raw) {
            Ok(url) => vec![Effect::AddUrl { url }],
            Err(err) => {
                state.set_add_form_error(err.to_string());
                Vec::new()
            }
        },
        Msg::UrlAdded(Ok(job)) => {
            dash_info!("URL added successfully: {}", job.url);
            state.close_add_form();
            begin_fetch(&mut state)
        }
        Msg::UrlAdded(Err(failure)) => {
            state.set_add_form_error(failure.to_string());
            report_failure(&mut state, "add URL", failure)
        }
        Msg::BulkActionRequested(action) => request_bulk(&mut state, action),
        Msg::BulkActionFinished { action, report } => finish_bulk(&mut state, action, report),
        Msg::SortClicked(field) => {
            let sort = state.sort().toggle(field);
            state.set_sort(sort);
            Vec::new()
        }
        Msg::SelectAllToggled(checked) => {
            let visible = state.visible_ids();
            state
                .selection_mut()
                .select_all(visible.iter().map(String::as_str), checked);
            Vec::new()
        }
        Msg::RowToggled { id, checked } => {
            state.selection_mut().set(&id, checked);
            Vec::new()
        }
        Msg::DetailsRequested(id) => {
            if !state.is_authenticated() {
                state.require_login();
                return (state, vec![Effect::NavigateToLogin]);
            }
            vec![Effect::FetchDetails { id }]
        }
        Msg::DetailsLoaded(Ok(job)) => {
            state.set_detail(Some(job));
            Vec::new()
        }
        Msg::DetailsLoaded(Err(failure)) => {
            state.set_detail(None);
            report_failure(&mut state, "fetch crawl job", failure)
        }
        Msg::DetailsClosed => {
            state.set_detail(None);
            Vec::new()
        }
        Msg::StatsRequested => {
            if !state.is_authenticated() {
                state.require_login();
                return (state, vec![Effect::NavigateToLogin]);
            }
            vec![Effect::FetchStats]
        }
        Msg::StatsLoaded(Ok(stats)) => {
            state.set_stats(stats);
            Vec::new()
        }
        Msg::StatsLoaded(Err(failure)) => report_failure(&mut state, "fetch statistics", failure),
        Msg::LogoutClicked => {
            state.reset_session();
            vec![Effect::Logout, Effect::NavigateToLogin]
        }
    };

    (state, effects)
}

fn begin_fetch(state: &mut DashboardState) -> Vec<Effect> {
    if !state.is_authenticated() {
        state.set_loading(false);
        state.require_login();
        return vec![Effect::NavigateToLogin];
    }
    state.set_loading(true);
    let search = Some(state.search_term().to_string()).filter(|term| !term.is_empty());
    vec![Effect::FetchJobs {
        query: CrawlUrlsQuery {
            page: Some(FETCH_PAGE),
            limit: Some(FETCH_LIMIT),
            status: None,
            search,
        },
    }]
}

fn request_bulk(state: &mut DashboardState, action: BulkAction) -> Vec<Effect> {
    if state.selection().is_empty() {
        return Vec::new();
    }
    let ids = state.selection().ids().to_vec();
    match action {
        BulkAction::Start => vec![Effect::StartCrawls { ids }],
        BulkAction::Delete => vec![Effect::DeleteUrls { ids }],
        BulkAction::Recrawl => vec![Effect::RecrawlUrls { ids }],
        BulkAction::Stop => {
            // No backend endpoint yet; treated as an immediate success.
            dash_info!("Stopping crawl jobs: {:?}", ids);
            finish_bulk(state, action, BulkReport::batch(&ids, Ok(())))
        }
    }
}

fn finish_bulk(state: &mut DashboardState, action: BulkAction, report: BulkReport) -> Vec<Effect> {
    if report.all_succeeded() {
        let ids: Vec<&str> = report.outcomes.iter().map(|o| o.id.as_str()).collect();
        dash_info!("Bulk {} succeeded for {:?}", action, ids);
        state.selection_mut().clear();
        return begin_fetch(state);
    }

    for (id, failure) in report.failures() {
        dash_error!("Failed to {} URL {}: {}", action, id, failure);
    }
    if report.auth_required() {
        state.require_login();
        return vec![Effect::NavigateToLogin];
    }
    Vec::new()
}

fn report_failure(state: &mut DashboardState, context: &str, failure: RequestFailure) -> Vec<Effect> {
    match failure {
        RequestFailure::AuthenticationRequired => {
            dash_warn!("Failed to {}: authentication required", context);
            state.require_login();
            vec![Effect::NavigateToLogin]
        }
        RequestFailure::Failed(message) => {
            dash_error!("Failed to {}: {}", context, message);
            Vec::new()
        }
    }
}
