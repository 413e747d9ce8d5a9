mod common;

use common::{init_logging, job, loaded_state};
use crawldash_core::{
    update, CrawlStats, CrawlUrlsQuery, DashboardState, Effect, Msg, RequestFailure, FETCH_LIMIT,
    FETCH_PAGE,
};

fn list_query(search: Option<&str>) -> Effect {
    Effect::FetchJobs {
        query: CrawlUrlsQuery {
            page: Some(FETCH_PAGE),
            limit: Some(FETCH_LIMIT),
            status: None,
            search: search.map(ToOwned::to_owned),
        },
    }
}

#[test]
fn mount_without_session_navigates_to_login() {
    init_logging();
    let (mut state, effects) = update(DashboardState::new(), Msg::Mounted);

    assert_eq!(effects, vec![Effect::NavigateToLogin]);
    assert!(!state.is_loading());
    assert!(state.view().needs_login);
    assert!(state.consume_dirty());
}

#[test]
fn mount_with_session_fetches_first_page() {
    init_logging();
    let (state, effects) = update(DashboardState::with_session(true), Msg::Mounted);

    assert_eq!(effects, vec![list_query(None)]);
    assert!(state.is_loading());
    assert_eq!(FETCH_LIMIT, 100);
}

#[test]
fn successful_fetch_replaces_list_wholesale() {
    init_logging();
    let state = loaded_state(vec![job("1", "https://a.example", "A"), job("2", "https://b.example", "B")]);
    let (state, _) = update(state, Msg::RefreshRequested);
    assert!(state.is_loading());

    let (state, effects) = update(
        state,
        Msg::JobsLoaded(Ok(vec![job("3", "https://c.example", "C")])),
    );

    assert!(effects.is_empty());
    assert!(!state.is_loading());
    let ids: Vec<_> = state.jobs().iter().map(|j| j.id.as_str()).collect();
    assert_eq!(ids, vec!["3"]);
}

#[test]
fn failed_fetch_keeps_last_good_list() {
    init_logging();
    let state = loaded_state(vec![job("1", "https://a.example", "A")]);
    let (state, _) = update(state, Msg::RefreshRequested);

    let (state, effects) = update(
        state,
        Msg::JobsLoaded(Err(RequestFailure::Failed("Failed to fetch crawl URLs".into()))),
    );

    assert!(effects.is_empty());
    assert!(!state.is_loading());
    assert_eq!(state.jobs().len(), 1);
    assert!(state.is_authenticated());
}

#[test]
fn authentication_failure_on_fetch_navigates_to_login() {
    init_logging();
    let state = loaded_state(vec![job("1", "https://a.example", "A")]);
    let (state, _) = update(state, Msg::RefreshRequested);

    let (state, effects) = update(state, Msg::JobsLoaded(Err(RequestFailure::AuthenticationRequired)));

    assert_eq!(effects, vec![Effect::NavigateToLogin]);
    assert!(!state.is_loading());
    assert!(!state.is_authenticated());

    // Further fetches stay gated until the session is restored.
    let (state, effects) = update(state, Msg::RefreshRequested);
    assert_eq!(effects, vec![Effect::NavigateToLogin]);
    let (state, _) = update(state, Msg::SessionChanged { authenticated: true });
    let (_, effects) = update(state, Msg::RefreshRequested);
    assert_eq!(effects, vec![list_query(None)]);
}

#[test]
fn fetch_sends_current_search_term() {
    init_logging();
    let state = loaded_state(Vec::new());
    let (state, _) = update(state, Msg::SearchChanged("docs".into()));
    let (_, effects) = update(state, Msg::RefreshRequested);

    assert_eq!(effects, vec![list_query(Some("docs"))]);
}

#[test]
fn add_url_validates_before_any_effect() {
    init_logging();
    let state = loaded_state(Vec::new());
    let (state, _) = update(state, Msg::AddFormOpened);

    let (state, effects) = update(state, Msg::AddUrlSubmitted("ftp://example.com".into()));
    assert!(effects.is_empty());
    let view = state.view();
    assert!(view.add_form_open);
    assert_eq!(
        view.add_form_error.as_deref(),
        Some("Please enter a valid HTTP or HTTPS URL")
    );

    let (_, effects) = update(state, Msg::AddUrlSubmitted("   ".into()));
    assert!(effects.is_empty());
}

#[test]
fn add_url_success_closes_form_and_refetches() {
    init_logging();
    let state = loaded_state(Vec::new());
    let (state, _) = update(state, Msg::AddFormOpened);
    let (state, effects) = update(state, Msg::AddUrlSubmitted(" https://new.example ".into()));
    assert_eq!(
        effects,
        vec![Effect::AddUrl {
            url: "https://new.example".into()
        }]
    );

    let (state, effects) = update(
        state,
        Msg::UrlAdded(Ok(job("9", "https://new.example", ""))),
    );
    assert_eq!(effects, vec![list_query(None)]);
    assert!(!state.is_add_form_open());
}

#[test]
fn add_url_failure_keeps_form_open() {
    init_logging();
    let state = loaded_state(Vec::new());
    let (state, _) = update(state, Msg::AddFormOpened);

    let (state, effects) = update(
        state,
        Msg::UrlAdded(Err(RequestFailure::Failed("Invalid URL format".into()))),
    );

    assert!(effects.is_empty());
    assert!(state.is_add_form_open());
    assert_eq!(state.view().add_form_error.as_deref(), Some("Invalid URL format"));
}

#[test]
fn details_and_stats_require_session() {
    init_logging();
    let (_, effects) = update(DashboardState::new(), Msg::DetailsRequested("1".into()));
    assert_eq!(effects, vec![Effect::NavigateToLogin]);

    let state = loaded_state(Vec::new());
    let (state, effects) = update(state, Msg::DetailsRequested("1".into()));
    assert_eq!(effects, vec![Effect::FetchDetails { id: "1".into() }]);
    let (state, _) = update(state, Msg::DetailsLoaded(Ok(job("1", "https://a.example", "A"))));
    assert_eq!(state.view().detail.map(|d| d.id), Some("1".to_string()));

    let (_, effects) = update(state, Msg::StatsRequested);
    assert_eq!(effects, vec![Effect::FetchStats]);
}

#[test]
fn logout_clears_user_state() {
    init_logging();
    let state = loaded_state(vec![job("1", "https://a.example", "A")]);
    let (state, _) = update(state, Msg::RowToggled { id: "1".into(), checked: true });

    let (state, effects) = update(state, Msg::LogoutClicked);

    assert_eq!(effects, vec![Effect::Logout, Effect::NavigateToLogin]);
    assert!(state.jobs().is_empty());
    assert!(state.selection().is_empty());
    assert!(!state.is_authenticated());
}

#[test]
fn responses_arriving_after_logout_are_dropped() {
    init_logging();
    let state = loaded_state(vec![job("1", "https://a.example", "A")]);
    let (state, effects) = update(state, Msg::RefreshRequested);
    assert_eq!(effects, vec![list_query(None)]);
    let (state, _) = update(state, Msg::DetailsRequested("1".into()));
    let (state, _) = update(state, Msg::StatsRequested);
    let (mut state, _) = update(state, Msg::LogoutClicked);
    state.consume_dirty();

    let (state, effects) = update(
        state,
        Msg::JobsLoaded(Ok(vec![job("1", "https://a.example", "A")])),
    );
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::DetailsLoaded(Ok(job("1", "https://a.example", "A"))));
    assert!(effects.is_empty());
    let (state, effects) = update(
        state,
        Msg::StatsLoaded(Ok(CrawlStats {
            total_urls: 1,
            ..CrawlStats::default()
        })),
    );
    assert!(effects.is_empty());
    let (mut state, effects) = update(
        state,
        Msg::JobsLoaded(Err(RequestFailure::AuthenticationRequired)),
    );
    assert!(effects.is_empty());

    assert!(!state.is_authenticated());
    assert!(state.jobs().is_empty());
    assert!(!state.is_loading());
    let view = state.view();
    assert!(view.rows.is_empty());
    assert_eq!(view.detail, None);
    assert_eq!(view.stats, None);
    assert!(!state.consume_dirty());
}

#[test]
fn new_session_accepts_fresh_responses() {
    init_logging();
    let state = loaded_state(Vec::new());
    let (state, _) = update(state, Msg::LogoutClicked);
    let (state, _) = update(state, Msg::SessionChanged { authenticated: true });
    let (state, effects) = update(state, Msg::Mounted);
    assert_eq!(effects, vec![list_query(None)]);

    let (state, _) = update(
        state,
        Msg::JobsLoaded(Ok(vec![job("2", "https://b.example", "B")])),
    );
    assert_eq!(state.jobs().len(), 1);
    assert!(!state.is_loading());
}
