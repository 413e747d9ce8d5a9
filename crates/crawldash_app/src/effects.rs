use std::io;
use std::sync::Arc;

use crawldash_client::{CrawlerBackend, EffectExecutor, EngineHandle};
use crawldash_core::{Effect, Msg};
use crawldash_logging::{dash_debug, dash_info};

/// Hands controller effects to the background engine and hands its messages
/// back to the caller.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(backend: Arc<dyn CrawlerBackend>, bulk_concurrency: usize) -> io::Result<Self> {
        let engine = EngineHandle::new(EffectExecutor::new(backend, bulk_concurrency))?;
        Ok(Self { engine })
    }

    /// Dispatch `effects`; returns whether any of them asked for the login
    /// screen.
    pub fn enqueue(&self, effects: Vec<Effect>) -> bool {
        let mut login_required = false;
        for effect in effects {
            match effect {
                Effect::NavigateToLogin => login_required = true,
                Effect::AddUrl { ref url } => {
                    dash_info!("AddUrl url_len={} url={}", url.len(), url);
                    self.engine.dispatch(effect);
                }
                effect => {
                    dash_debug!("Dispatching {:?}", effect);
                    self.engine.dispatch(effect);
                }
            }
        }
        login_required
    }

    pub fn try_recv(&self) -> Option<Msg> {
        self.engine.try_recv()
    }
}
