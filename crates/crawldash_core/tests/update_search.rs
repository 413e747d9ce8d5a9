mod common;

use common::{init_logging, job, loaded_state};
use crawldash_core::{update, Effect, Msg, SEARCH_DEBOUNCE};

#[test]
fn each_keystroke_schedules_a_newer_revision() {
    init_logging();
    let state = loaded_state(Vec::new());

    let (state, first) = update(state, Msg::SearchChanged("d".into()));
    let (state, second) = update(state, Msg::SearchChanged("do".into()));
    let (state, third) = update(state, Msg::SearchChanged("doc".into()));

    assert_eq!(
        first,
        vec![Effect::ScheduleSearch { revision: 1, delay: SEARCH_DEBOUNCE }]
    );
    assert_eq!(
        second,
        vec![Effect::ScheduleSearch { revision: 2, delay: SEARCH_DEBOUNCE }]
    );
    assert_eq!(
        third,
        vec![Effect::ScheduleSearch { revision: 3, delay: SEARCH_DEBOUNCE }]
    );
    assert_eq!(state.search_revision(), 3);
}

#[test]
fn only_latest_revision_triggers_fetch_with_latest_term() {
    init_logging();
    let state = loaded_state(Vec::new());
    let (state, _) = update(state, Msg::SearchChanged("d".into()));
    let (state, _) = update(state, Msg::SearchChanged("do".into()));

    let (state, stale) = update(state, Msg::SearchDebounceElapsed { revision: 1 });
    assert!(stale.is_empty());
    assert!(!state.is_loading());

    let (state, effects) = update(state, Msg::SearchDebounceElapsed { revision: 2 });
    match effects.as_slice() {
        [Effect::FetchJobs { query }] => assert_eq!(query.search.as_deref(), Some("do")),
        other => panic!("unexpected effects: {other:?}"),
    }
    assert!(state.is_loading());
}

#[test]
fn debounce_firing_while_loading_is_dropped() {
    init_logging();
    let state = loaded_state(Vec::new());
    let (state, _) = update(state, Msg::RefreshRequested);
    let (state, _) = update(state, Msg::SearchChanged("x".into()));

    let (state, effects) = update(state, Msg::SearchDebounceElapsed { revision: 1 });
    assert!(effects.is_empty());

    // Not queued: completing the in-flight fetch does not replay it.
    let (_, effects) = update(state, Msg::JobsLoaded(Ok(Vec::new())));
    assert!(effects.is_empty());
}

#[test]
fn unchanged_term_schedules_nothing() {
    init_logging();
    let state = loaded_state(Vec::new());
    let (state, _) = update(state, Msg::SearchChanged("abc".into()));
    let (state, effects) = update(state, Msg::SearchChanged("abc".into()));

    assert!(effects.is_empty());
    assert_eq!(state.search_revision(), 1);
}

#[test]
fn client_side_filter_matches_url_or_title_case_insensitively() {
    init_logging();
    let state = loaded_state(vec![
        job("1", "https://Docs.example.com", ""),
        job("2", "https://shop.example.com", "Product DOCS"),
        job("3", "https://blog.example.com", "News"),
    ]);

    let (state, _) = update(state, Msg::SearchChanged("docs".into()));
    let view = state.view();

    let mut ids: Vec<_> = view.rows.iter().map(|r| r.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["1", "2"]);
    assert_eq!(view.total_jobs, 3);
}
