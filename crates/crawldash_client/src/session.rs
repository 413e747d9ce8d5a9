use std::sync::{Arc, Mutex, MutexGuard};

use crawldash_logging::{dash_debug, dash_error};

use crate::storage::{KeyValueStore, MemoryStore};

/// Storage key holding the bearer token.
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Current bearer token, mirrored to durable storage.
///
/// The in-memory copy is authoritative; storage failures are logged and do
/// not roll back the in-memory change.
pub struct Session {
    token: Mutex<Option<String>>,
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    /// Seed the session from storage. Storage is read only here.
    pub fn restore(store: Arc<dyn KeyValueStore>) -> Self {
        let token = store.get(AUTH_TOKEN_KEY).filter(|token| !token.is_empty());
        dash_debug!("Session restored (token present: {})", token.is_some());
        Self {
            token: Mutex::new(token),
            store,
        }
    }

    pub fn in_memory() -> Self {
        Self::restore(Arc::new(MemoryStore::default()))
    }

    pub fn token(&self) -> Option<String> {
        self.lock().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().as_deref().is_some_and(|token| !token.is_empty())
    }

    /// Store a new token; an empty token clears the session.
    ///
    /// Memory and storage are updated under one lock.
    pub fn set_token(&self, token: &str) {
        if token.is_empty() {
            self.clear();
            return;
        }
        let mut current = self.lock();
        *current = Some(token.to_string());
        if let Err(err) = self.store.set(AUTH_TOKEN_KEY, token) {
            dash_error!("Failed to persist session token: {}", err);
        }
    }

    pub fn clear(&self) {
        let mut current = self.lock();
        *current = None;
        if let Err(err) = self.store.remove(AUTH_TOKEN_KEY) {
            dash_error!("Failed to clear persisted session token: {}", err);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
