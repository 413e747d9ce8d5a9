use std::fmt;

use crate::JobId;

/// How a backend call failed, as seen by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    /// HTTP 401 from any endpoint; the session has already been cleared.
    AuthenticationRequired,
    Failed(String),
}

impl RequestFailure {
    pub fn is_auth(&self) -> bool {
        matches!(self, RequestFailure::AuthenticationRequired)
    }
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestFailure::AuthenticationRequired => write!(f, "Authentication required"),
            RequestFailure::Failed(message) => f.write_str(message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BulkAction {
    Start,
    Stop,
    Delete,
    Recrawl,
}

impl BulkAction {
    pub fn as_str(self) -> &'static str {
        match self {
            BulkAction::Start => "start",
            BulkAction::Stop => "stop",
            BulkAction::Delete => "delete",
            BulkAction::Recrawl => "recrawl",
        }
    }
}

impl fmt::Display for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    pub id: JobId,
    pub result: Result<(), RequestFailure>,
}

/// Per-id results of a bulk action, in selection order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BulkReport {
    pub outcomes: Vec<ItemOutcome>,
}

impl BulkReport {
    /// One batched call: every id shares its result.
    pub fn batch(ids: &[JobId], result: Result<(), RequestFailure>) -> Self {
        Self {
            outcomes: ids
                .iter()
                .map(|id| ItemOutcome {
                    id: id.clone(),
                    result: result.clone(),
                })
                .collect(),
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&JobId, &RequestFailure)> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().err().map(|err| (&outcome.id, err)))
    }

    pub fn auth_required(&self) -> bool {
        self.failures().any(|(_, failure)| failure.is_auth())
    }
}
