//! Storage reconciliation for the Gem record list.
//!
//! The record list is replaced wholesale on every update; the cache never
//! merges field by field. Both the write path and the read path apply the
//! validity filter, and the read path writes back whatever it had to drop so
//! invalid entries do not resurface.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use gemdex_core::{CacheSnapshot, KeyValueStore, Record, keys};

use crate::codec::{read_key, write_key};

/// Result of [`RecordCache::replace_records`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplaceOutcome {
    /// The stored list already matched; nothing was written.
    Unchanged,
    /// The stored list was replaced.
    Replaced { count: usize },
    /// The write failed and was logged; the stored list is whatever it was.
    WriteFailed,
}

/// The persisted Gem record list.
#[derive(Debug)]
pub struct RecordCache<S> {
    store: S,
}

impl<S: KeyValueStore> RecordCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replace the cached list with `records`.
    ///
    /// Invalid records are dropped and duplicate ids collapse to their first
    /// occurrence. Re-ingesting the list already stored issues no write.
    /// Persistence failures are logged, never returned.
    #[instrument(skip_all, fields(incoming = records.len()))]
    pub async fn replace_records(&self, records: Vec<Record>) -> ReplaceOutcome {
        let records = sanitize(records);

        match self.store.get(keys::RECORDS).await {
            Ok(Some(stored)) => {
                let (current, dropped) = decode_records(stored);
                if dropped == 0 && current == records {
                    debug!("Record list unchanged");
                    return ReplaceOutcome::Unchanged;
                }
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Failed to read cached records before replacing"),
        }

        match write_key(&self.store, keys::RECORDS, &records).await {
            Ok(()) => {
                debug!(count = records.len(), "Replaced cached records");
                ReplaceOutcome::Replaced {
                    count: records.len(),
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to persist records");
                ReplaceOutcome::WriteFailed
            }
        }
    }

    /// Read the cached list, dropping and writing back invalid entries.
    ///
    /// A failed read yields an empty list; a failed write-back still returns
    /// the filtered list.
    #[instrument(skip_all)]
    pub async fn load_records(&self) -> Vec<Record> {
        let stored = match self.store.get(keys::RECORDS).await {
            Ok(Some(stored)) => stored,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read cached records");
                return Vec::new();
            }
        };

        let (records, dropped) = decode_records(stored);
        if dropped > 0 {
            debug!(dropped, kept = records.len(), "Removing invalid cached records");
            if let Err(e) = write_key(&self.store, keys::RECORDS, &records).await {
                warn!(error = %e, "Failed to write back filtered records");
            }
        }

        records
    }

    /// Records plus favorites, emoji overrides and options.
    ///
    /// Parts that fail to read or decode fall back to their defaults.
    pub async fn snapshot(&self) -> CacheSnapshot {
        CacheSnapshot {
            records: self.load_records().await,
            favorites: self.read_or_default(keys::FAVORITES).await,
            emoji_map: self.read_or_default(keys::EMOJI_MAP).await,
            options: self.read_or_default(keys::OPTIONS).await,
        }
    }

    async fn read_or_default<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        match read_key(&self.store, key).await {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                warn!(key, error = %e, "Falling back to default");
                T::default()
            }
        }
    }
}

/// Keep valid records, first occurrence of each id.
fn sanitize(records: impl IntoIterator<Item = Record>) -> Vec<Record> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| record.is_valid() && seen.insert(record.id.clone()))
        .collect()
}

/// Decode a stored list element by element.
///
/// Returns the valid, de-duplicated records and how many stored entries
/// were dropped. A value that is not an array drops everything.
fn decode_records(stored: Value) -> (Vec<Record>, usize) {
    let Value::Array(items) = stored else {
        return (Vec::new(), 1);
    };

    let total = items.len();
    let decoded = items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<Record>(item).ok());
    let records = sanitize(decoded);
    let dropped = total - records.len();

    (records, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use async_trait::async_trait;
    use gemdex_core::error::StoreError;
    use gemdex_core::{GemId, Options, PLACEHOLDER_NAME, Result};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts writes and can be told to fail them.
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        writes: AtomicUsize,
        fail_writes: bool,
    }

    impl CountingStore {
        fn failing() -> Self {
            Self {
                fail_writes: true,
                ..Self::default()
            }
        }

        fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl KeyValueStore for CountingStore {
        async fn get(&self, key: &str) -> Result<Option<Value>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: Value) -> Result<()> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes {
                return Err(StoreError::Io {
                    message: "disk full".to_string(),
                }
                .into());
            }
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<()> {
            self.inner.remove(key).await
        }
    }

    fn record(id: &str, name: &str) -> Record {
        Record::new(GemId::new(id).unwrap(), name, "")
    }

    #[test]
    fn sanitize_drops_invalid_and_duplicates() {
        let records = sanitize(vec![
            record("a", "First"),
            record("b", PLACEHOLDER_NAME),
            record("a", "Shadowed"),
            record("c", " "),
            record("d", "Kept"),
        ]);
        assert_eq!(records, vec![record("a", "First"), record("d", "Kept")]);
    }

    #[test]
    fn decode_counts_dropped_entries() {
        let (records, dropped) = decode_records(json!([
            {"id": "a", "name": "Good", "description": "x"},
            {"id": "b", "name": "Unknown Gem"},
            {"id": "", "name": "Empty id"},
            {"name": "No id"},
            "garbage"
        ]));
        assert_eq!(records.len(), 1);
        assert_eq!(dropped, 4);

        assert_eq!(decode_records(json!({"id": "a"})), (Vec::new(), 1));
        assert_eq!(decode_records(json!([])), (Vec::new(), 0));
    }

    #[tokio::test]
    async fn replace_then_load() {
        let cache = RecordCache::new(MemoryStore::new());
        let outcome = cache
            .replace_records(vec![record("a", "Alpha"), record("b", "Unknown Gem")])
            .await;

        assert_eq!(outcome, ReplaceOutcome::Replaced { count: 1 });
        assert_eq!(cache.load_records().await, vec![record("a", "Alpha")]);
    }

    #[tokio::test]
    async fn replacement_is_total() {
        let cache = RecordCache::new(MemoryStore::new());
        cache
            .replace_records(vec![record("a", "Alpha"), record("b", "Beta")])
            .await;
        cache.replace_records(vec![record("c", "Gamma")]).await;

        assert_eq!(cache.load_records().await, vec![record("c", "Gamma")]);
    }

    #[tokio::test]
    async fn identical_list_is_not_rewritten() {
        let cache = RecordCache::new(CountingStore::default());
        let list = vec![record("a", "Alpha"), record("b", "Beta")];

        cache.replace_records(list.clone()).await;
        let outcome = cache.replace_records(list).await;

        assert_eq!(outcome, ReplaceOutcome::Unchanged);
        assert_eq!(cache.store().writes(), 1);
    }

    #[tokio::test]
    async fn empty_list_clears_the_cache() {
        let cache = RecordCache::new(MemoryStore::new());
        cache.replace_records(vec![record("a", "Alpha")]).await;

        let outcome = cache.replace_records(Vec::new()).await;

        assert_eq!(outcome, ReplaceOutcome::Replaced { count: 0 });
        assert!(cache.load_records().await.is_empty());
    }

    #[tokio::test]
    async fn load_writes_back_filtered_list() {
        let store = CountingStore::default();
        store
            .inner
            .set(
                keys::RECORDS,
                json!([
                    {"id": "a", "name": "Alpha", "description": ""},
                    {"id": "b", "name": "Unknown Gem", "description": ""}
                ]),
            )
            .await
            .unwrap();
        let cache = RecordCache::new(store);

        assert_eq!(cache.load_records().await, vec![record("a", "Alpha")]);
        assert_eq!(cache.store().writes(), 1);

        // Already clean; nothing more to write.
        assert_eq!(cache.load_records().await, vec![record("a", "Alpha")]);
        assert_eq!(cache.store().writes(), 1);
    }

    #[tokio::test]
    async fn missing_key_loads_empty() {
        let cache = RecordCache::new(CountingStore::default());
        assert!(cache.load_records().await.is_empty());
        assert_eq!(cache.store().writes(), 0);
    }

    #[tokio::test]
    async fn write_failure_is_reported_not_raised() {
        let cache = RecordCache::new(CountingStore::failing());
        let outcome = cache.replace_records(vec![record("a", "Alpha")]).await;

        assert_eq!(outcome, ReplaceOutcome::WriteFailed);
        assert!(cache.load_records().await.is_empty());
    }

    #[tokio::test]
    async fn snapshot_defaults_undecodable_parts() {
        let store = MemoryStore::new();
        store.set(keys::OPTIONS, json!("not an object")).await.unwrap();
        store.set(keys::FAVORITES, json!(["a"])).await.unwrap();
        let cache = RecordCache::new(store);
        cache.replace_records(vec![record("a", "Alpha")]).await;

        let snapshot = cache.snapshot().await;

        assert_eq!(snapshot.records, vec![record("a", "Alpha")]);
        assert!(snapshot.favorites.contains(&GemId::new("a").unwrap()));
        assert!(snapshot.emoji_map.is_empty());
        assert_eq!(snapshot.options, Options::default());
    }
}
