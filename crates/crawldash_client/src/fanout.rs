use std::future::Future;

use crawldash_core::{BulkReport, ItemOutcome, JobId};
use crawldash_logging::dash_warn;
use futures_util::stream::{self, StreamExt};

use crate::ApiError;

/// Run `call` once per id with at most `concurrency` calls in flight.
///
/// Every call runs to completion regardless of the others; the report holds
/// one outcome per id, in input order.
pub async fn fan_out<F, Fut>(ids: &[JobId], concurrency: usize, call: F) -> BulkReport
where
    F: Fn(JobId) -> Fut,
    Fut: Future<Output = Result<(), ApiError>>,
{
    let limit = concurrency.max(1);
    let mut indexed: Vec<(usize, ItemOutcome)> = stream::iter(ids.iter().cloned().enumerate())
        .map(|(index, id)| {
            let pending = call(id.clone());
            async move {
                let result = pending.await.map_err(|err| {
                    dash_warn!("Bulk call for {} failed: {}", id, err);
                    err.to_failure()
                });
                (index, ItemOutcome { id, result })
            }
        })
        .buffer_unordered(limit)
        .collect()
        .await;
    indexed.sort_by_key(|(index, _)| *index);
    BulkReport {
        outcomes: indexed.into_iter().map(|(_, outcome)| outcome).collect(),
    }
}
