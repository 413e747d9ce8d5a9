//! Crawl dashboard client: authenticated HTTP access to the crawler service,
//! session persistence, and the async executor for controller effects.
mod api;
mod engine;
mod error;
mod executor;
mod fanout;
mod session;
mod settings;
mod storage;
mod types;

pub use api::{ApiClient, CrawlerBackend};
pub use engine::{EngineHandle, SearchDebouncer};
pub use error::ApiError;
pub use executor::EffectExecutor;
pub use fanout::fan_out;
pub use session::{Session, AUTH_TOKEN_KEY};
pub use settings::{ClientSettings, DEFAULT_BASE_URL};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use types::{BulkAddOutcome, LoginResponse, Registration, UserProfile};
