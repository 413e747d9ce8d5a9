use std::sync::Arc;

use crawldash_core::{BulkAction, BulkReport, Effect, Msg};
use crawldash_logging::dash_debug;

use crate::{fan_out, ApiError, CrawlerBackend};

/// Runs network effects against a backend and turns each result into the
/// message the controller expects back.
#[derive(Clone)]
pub struct EffectExecutor {
    backend: Arc<dyn CrawlerBackend>,
    bulk_concurrency: usize,
}

impl EffectExecutor {
    pub fn new(backend: Arc<dyn CrawlerBackend>, bulk_concurrency: usize) -> Self {
        Self {
            backend,
            bulk_concurrency: bulk_concurrency.max(1),
        }
    }

    /// `None` for effects that produce no message or belong to the host
    /// (`ScheduleSearch`, `NavigateToLogin`).
    pub async fn execute(&self, effect: Effect) -> Option<Msg> {
        let backend = self.backend.as_ref();
        let msg = match effect {
            Effect::FetchJobs { query } => Msg::JobsLoaded(
                backend
                    .get_crawl_urls(&query)
                    .await
                    .map(|page| page.jobs)
                    .map_err(|err| err.to_failure()),
            ),
            Effect::AddUrl { url } => {
                Msg::UrlAdded(backend.add_url(&url).await.map_err(|err| err.to_failure()))
            }
            Effect::StartCrawls { ids } => {
                let report = fan_out(&ids, self.bulk_concurrency, |id| {
                    let backend = self.backend.clone();
                    async move { backend.start_crawl(&id).await }
                })
                .await;
                Msg::BulkActionFinished {
                    action: BulkAction::Start,
                    report,
                }
            }
            Effect::DeleteUrls { ids } => Msg::BulkActionFinished {
                action: BulkAction::Delete,
                report: batch_report(&ids, backend.delete_urls(&ids).await),
            },
            Effect::RecrawlUrls { ids } => Msg::BulkActionFinished {
                action: BulkAction::Recrawl,
                report: batch_report(&ids, backend.recrawl_urls(&ids).await),
            },
            Effect::FetchDetails { id } => Msg::DetailsLoaded(
                backend
                    .get_crawl_result(&id)
                    .await
                    .map_err(|err| err.to_failure()),
            ),
            Effect::FetchStats => {
                Msg::StatsLoaded(backend.get_stats().await.map_err(|err| err.to_failure()))
            }
            Effect::Logout => {
                backend.logout();
                return None;
            }
            Effect::ScheduleSearch { .. } | Effect::NavigateToLogin => {
                dash_debug!("Effect {:?} is handled by the host", effect);
                return None;
            }
        };
        Some(msg)
    }
}

fn batch_report(ids: &[String], result: Result<(), ApiError>) -> BulkReport {
    BulkReport::batch(ids, result.map_err(|err| err.to_failure()))
}
