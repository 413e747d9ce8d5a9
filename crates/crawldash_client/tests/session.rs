use std::fs;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crawldash_client::{
    FileStore, KeyValueStore, MemoryStore, Session, StorageError, AUTH_TOKEN_KEY,
};
use tempfile::TempDir;

#[test]
fn file_store_round_trips_token_across_instances() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("storage.ron");

    let session = Session::restore(Arc::new(FileStore::open(&path)));
    assert!(!session.is_authenticated());
    session.set_token("abc");
    assert!(path.exists());

    let restored = Session::restore(Arc::new(FileStore::open(&path)));
    assert_eq!(restored.token().as_deref(), Some("abc"));

    restored.clear();
    let cleared = FileStore::open(&path);
    assert_eq!(cleared.get(AUTH_TOKEN_KEY), None);
}

#[test]
fn corrupt_storage_file_reads_as_empty() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("storage.ron");
    fs::write(&path, "{ this is not ron").unwrap();

    let store = FileStore::open(&path);
    assert_eq!(store.get(AUTH_TOKEN_KEY), None);

    store.set(AUTH_TOKEN_KEY, "fresh").unwrap();
    assert_eq!(FileStore::open(&path).get(AUTH_TOKEN_KEY).as_deref(), Some("fresh"));
}

#[test]
fn empty_token_is_not_a_session() {
    let store = Arc::new(MemoryStore::default());
    store.set(AUTH_TOKEN_KEY, "").unwrap();
    let session = Session::restore(store.clone());
    assert!(!session.is_authenticated());

    session.set_token("t");
    assert!(session.is_authenticated());
    session.set_token("");
    assert!(!session.is_authenticated());
    assert_eq!(store.get(AUTH_TOKEN_KEY), None);
}

#[test]
fn debug_output_hides_token() {
    let session = Session::in_memory();
    session.set_token("secret-token");
    let rendered = format!("{session:?}");
    assert!(!rendered.contains("secret-token"));
    assert!(rendered.contains("authenticated: true"));
}

/// Store whose writes take long enough for callers to interleave.
#[derive(Default)]
struct SlowStore {
    inner: MemoryStore,
}

impl KeyValueStore for SlowStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        thread::sleep(Duration::from_millis(1));
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        thread::sleep(Duration::from_millis(1));
        self.inner.remove(key)
    }
}

#[test]
fn concurrent_set_and_clear_keep_memory_and_storage_in_agreement() {
    for round in 0..10 {
        let store = Arc::new(SlowStore::default());
        let session = Arc::new(Session::restore(store.clone()));

        let workers: Vec<_> = (0..4)
            .map(|worker| {
                let session = session.clone();
                thread::spawn(move || {
                    for step in 0..10 {
                        if (worker + step) % 2 == 0 {
                            session.set_token(&format!("token-{worker}-{step}"));
                        } else {
                            session.clear();
                        }
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(session.token(), store.get(AUTH_TOKEN_KEY), "round {round}");
    }
}
