//! In-memory storage engine over a concurrent map.
//!
//! Reference implementation of [`StorageEngine`]; unrestricted scans walk
//! entries in key order so results are deterministic.

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;
use tracing::debug;

use super::{StorageEngine, StoreConfig};

/// Failure modes of the in-memory store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A new key would push the store past its configured bound.
    #[error("store capacity exceeded (limit {limit})")]
    CapacityExceeded { limit: u64 },
}

/// In-memory storage engine.
#[derive(Debug)]
pub struct MemoryStore<T> {
    entries: DashMap<String, T>,
    config: StoreConfig,
}

impl<T> MemoryStore<T> {
    /// Create an unbounded store.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create a store with the given config.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            entries: DashMap::new(),
            config,
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keys currently stored, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> StorageEngine<T> for MemoryStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Result<Option<T>> {
        let hit = self.entries.get(key).map(|entry| entry.value().clone());
        debug!("Store get {key}: {}", if hit.is_some() { "hit" } else { "miss" });
        Ok(hit)
    }

    async fn upsert(&self, key: &str, entity: &T) -> Result<()> {
        if let Some(limit) = self.config.max_entries
            && !self.entries.contains_key(key)
            && self.entries.len() as u64 >= limit
        {
            return Err(StoreError::CapacityExceeded { limit }.into());
        }

        self.entries.insert(key.to_owned(), entity.clone());
        debug!("Store upsert {key}");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<Option<T>> {
        let removed = self.entries.remove(key).map(|(_, entity)| entity);
        debug!(
            "Store remove {key}: {}",
            if removed.is_some() { "removed" } else { "absent" }
        );
        Ok(removed)
    }

    async fn filter(
        &self,
        predicate: &(dyn for<'a> Fn(&'a T) -> bool + Sync),
        keys: Option<&[String]>,
    ) -> Result<Vec<T>> {
        let mut matches = Vec::new();

        match keys {
            Some(keys) => {
                for key in keys {
                    if let Some(entry) = self.entries.get(key)
                        && predicate(entry.value())
                    {
                        matches.push(entry.value().clone());
                    }
                }
            }
            None => {
                for key in self.keys() {
                    if let Some(entry) = self.entries.get(&key)
                        && predicate(entry.value())
                    {
                        matches.push(entry.value().clone());
                    }
                }
            }
        }

        Ok(matches)
    }

    async fn find(
        &self,
        predicate: &(dyn for<'a> Fn(&'a T) -> bool + Sync),
        keys: Option<&[String]>,
    ) -> Result<Option<T>> {
        match keys {
            Some(keys) => {
                for key in keys {
                    if let Some(entry) = self.entries.get(key)
                        && predicate(entry.value())
                    {
                        return Ok(Some(entry.value().clone()));
                    }
                }
            }
            None => {
                for key in self.keys() {
                    if let Some(entry) = self.entries.get(&key)
                        && predicate(entry.value())
                    {
                        return Ok(Some(entry.value().clone()));
                    }
                }
            }
        }

        Ok(None)
    }
}
