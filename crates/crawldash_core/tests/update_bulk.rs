mod common;

use common::{init_logging, job, loaded_state};
use crawldash_core::{
    update, BulkAction, BulkReport, DashboardState, Effect, ItemOutcome, Msg, RequestFailure,
};

fn selected(ids: &[&str]) -> DashboardState {
    let mut state = loaded_state(
        ["A", "B", "C"]
            .iter()
            .map(|id| job(id, &format!("https://{id}.example"), id))
            .collect(),
    );
    for id in ids {
        let (next, _) = update(state, Msg::RowToggled { id: id.to_string(), checked: true });
        state = next;
    }
    state
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|id| id.to_string()).collect()
}

#[test]
fn empty_selection_is_noop() {
    init_logging();
    for action in [BulkAction::Start, BulkAction::Stop, BulkAction::Delete, BulkAction::Recrawl] {
        let state = selected(&[]);
        let (next, effects) = update(state.clone(), Msg::BulkActionRequested(action));
        assert!(effects.is_empty());
        assert_eq!(next.jobs(), state.jobs());
    }
}

#[test]
fn delete_issues_one_batched_call_then_refreshes_and_clears() {
    init_logging();
    let state = selected(&["A", "B"]);

    let (state, effects) = update(state, Msg::BulkActionRequested(BulkAction::Delete));
    assert_eq!(effects, vec![Effect::DeleteUrls { ids: ids(&["A", "B"]) }]);

    let (state, effects) = update(
        state,
        Msg::BulkActionFinished {
            action: BulkAction::Delete,
            report: BulkReport::batch(&ids(&["A", "B"]), Ok(())),
        },
    );
    assert!(matches!(effects.as_slice(), [Effect::FetchJobs { .. }]));
    assert!(state.selection().is_empty());
}

#[test]
fn start_emits_one_effect_covering_each_selected_id() {
    init_logging();
    let state = selected(&["A", "B"]);
    let (_, effects) = update(state, Msg::BulkActionRequested(BulkAction::Start));
    assert_eq!(effects, vec![Effect::StartCrawls { ids: ids(&["A", "B"]) }]);
}

#[test]
fn partial_start_failure_keeps_selection_and_skips_refresh() {
    init_logging();
    let state = selected(&["A", "B"]);
    let (state, _) = update(state, Msg::BulkActionRequested(BulkAction::Start));

    let report = BulkReport {
        outcomes: vec![
            ItemOutcome { id: "A".into(), result: Ok(()) },
            ItemOutcome {
                id: "B".into(),
                result: Err(RequestFailure::Failed("Failed to start crawl".into())),
            },
        ],
    };
    let (state, effects) = update(
        state,
        Msg::BulkActionFinished { action: BulkAction::Start, report },
    );

    assert!(effects.is_empty());
    assert_eq!(state.selection().ids(), ids(&["A", "B"]).as_slice());
    assert!(!state.is_loading());
}

#[test]
fn bulk_auth_failure_navigates_to_login() {
    init_logging();
    let state = selected(&["A"]);
    let (state, effects) = update(
        state,
        Msg::BulkActionFinished {
            action: BulkAction::Recrawl,
            report: BulkReport::batch(&ids(&["A"]), Err(RequestFailure::AuthenticationRequired)),
        },
    );

    assert_eq!(effects, vec![Effect::NavigateToLogin]);
    assert!(!state.is_authenticated());
    assert_eq!(state.selection().len(), 1);
}

#[test]
fn stop_makes_no_call_but_refreshes_and_clears() {
    init_logging();
    let state = selected(&["C"]);
    let (state, effects) = update(state, Msg::BulkActionRequested(BulkAction::Stop));

    assert!(matches!(effects.as_slice(), [Effect::FetchJobs { .. }]));
    assert!(state.selection().is_empty());
}

#[test]
fn recrawl_is_a_single_batched_call() {
    init_logging();
    let state = selected(&["B", "A"]);
    let (_, effects) = update(state, Msg::BulkActionRequested(BulkAction::Recrawl));
    assert_eq!(effects, vec![Effect::RecrawlUrls { ids: ids(&["B", "A"]) }]);
}
