use async_trait::async_trait;
use burrow_core::{Alias, ReadUrlStore, Result, StoreError, UrlRecord, UrlStore};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// In-memory implementation of the store traits using DashMap.
///
/// Follows the same contract as [`SqliteUrlStore`](crate::SqliteUrlStore):
/// ids start at 1 and are never reused, a taken alias yields
/// [`StoreError::AlreadyExists`] and a missing one [`StoreError::NotFound`].
#[derive(Debug)]
pub struct InMemoryUrlStore {
    records: DashMap<String, UrlRecord>,
    next_id: AtomicI64,
}

impl InMemoryUrlStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for InMemoryUrlStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadUrlStore for InMemoryUrlStore {
    async fn get_url(&self, alias: &Alias) -> Result<String> {
        self.records
            .get(alias.as_str())
            .map(|record| record.url.clone())
            .ok_or_else(|| StoreError::NotFound(alias.to_string()))
    }
}

#[async_trait]
impl UrlStore for InMemoryUrlStore {
    async fn save_url(&self, url: &str, alias: &Alias) -> Result<i64> {
        // The entry guard holds the shard lock, so check-and-insert is atomic.
        match self.records.entry(alias.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(alias.to_string())),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                slot.insert(UrlRecord {
                    id,
                    alias: alias.clone(),
                    url: url.to_owned(),
                });
                Ok(id)
            }
        }
    }

    async fn delete_url(&self, alias: &Alias) -> Result<()> {
        self.records
            .remove(alias.as_str())
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(alias.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn alias(s: &str) -> Alias {
        Alias::new_unchecked(s)
    }

    #[tokio::test]
    async fn save_and_get() {
        let store = InMemoryUrlStore::new();

        let id = store
            .save_url("https://example.com", &alias("ex1"))
            .await
            .unwrap();

        assert_eq!(id, 1);
        assert_eq!(
            store.get_url(&alias("ex1")).await.unwrap(),
            "https://example.com"
        );
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let store = InMemoryUrlStore::new();

        let err = store.get_url(&alias("nope")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(a) if a == "nope"));
    }

    #[tokio::test]
    async fn save_conflict_keeps_first_record() {
        let store = InMemoryUrlStore::new();

        store
            .save_url("https://example.com", &alias("ex1"))
            .await
            .unwrap();
        let err = store
            .save_url("https://other.com", &alias("ex1"))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::AlreadyExists(_)));
        assert_eq!(
            store.get_url(&alias("ex1")).await.unwrap(),
            "https://example.com"
        );
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn delete_existing() {
        let store = InMemoryUrlStore::new();
        store
            .save_url("https://example.com", &alias("ex1"))
            .await
            .unwrap();

        store.delete_url(&alias("ex1")).await.unwrap();

        assert!(store.get_url(&alias("ex1")).await.unwrap_err().is_not_found());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn delete_nonexistent() {
        let store = InMemoryUrlStore::new();
        store
            .save_url("https://example.com", &alias("ex1"))
            .await
            .unwrap();

        let err = store.delete_url(&alias("nope")).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = InMemoryUrlStore::new();

        let first = store.save_url("https://a.com", &alias("a")).await.unwrap();
        store.delete_url(&alias("a")).await.unwrap();
        let second = store.save_url("https://a.com", &alias("a")).await.unwrap();

        assert!(second > first);
    }

    #[tokio::test]
    async fn concurrent_saves_of_one_alias_admit_a_single_winner() {
        let store = Arc::new(InMemoryUrlStore::new());
        let mut handles = vec![];

        for i in 0..16u32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .save_url(&format!("https://example{i}.com"), &alias("hot"))
                    .await
            }));
        }

        let mut ok = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => ok += 1,
                Err(err) => assert!(err.is_already_exists()),
            }
        }

        assert_eq!(ok, 1);
        assert_eq!(store.len(), 1);
    }
}
