//! Id index: the queryable set of ids known under one namespace.

use std::collections::BTreeSet;

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

/// Index of the ids known to exist under one namespace.
///
/// Implementations are scoped to a single namespace at construction; the
/// cache keeps the set consistent with storage (add on every successful
/// write, remove on every successful delete). Enumeration via [`ids`]
/// is part of the contract - it is what makes the index queryable and
/// what reconciliation walks.
///
/// [`ids`]: KeyIndex::ids
#[async_trait]
pub trait KeyIndex: Send + Sync {
    /// Record `id` as existing. Idempotent.
    async fn add(&self, id: &str) -> Result<()>;

    /// Forget `id`. Idempotent.
    async fn remove(&self, id: &str) -> Result<()>;

    /// All recorded ids.
    async fn ids(&self) -> Result<Vec<String>>;
}

/// In-memory reference index.
#[derive(Debug)]
pub struct MemoryIndex {
    namespace: String,
    ids: RwLock<BTreeSet<String>>,
}

impl MemoryIndex {
    /// Create an empty index for the given namespace.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ids: RwLock::new(BTreeSet::new()),
        }
    }

    /// The namespace this index is scoped to.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Whether `id` is recorded.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.read().contains(id)
    }

    /// Number of recorded ids.
    pub fn len(&self) -> usize {
        self.ids.read().len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.read().is_empty()
    }
}

#[async_trait]
impl KeyIndex for MemoryIndex {
    async fn add(&self, id: &str) -> Result<()> {
        if self.ids.write().insert(id.to_owned()) {
            debug!("Indexed {} id {id}", self.namespace);
        }
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<()> {
        if self.ids.write().remove(id) {
            debug!("Unindexed {} id {id}", self.namespace);
        }
        Ok(())
    }

    async fn ids(&self) -> Result<Vec<String>> {
        Ok(self.ids.read().iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_remove_contains() {
        let index = MemoryIndex::new("message");
        assert!(index.is_empty());

        index.add("42").await.unwrap();
        assert!(index.contains("42"));
        assert_eq!(index.len(), 1);

        // Idempotent add
        index.add("42").await.unwrap();
        assert_eq!(index.len(), 1);

        index.remove("42").await.unwrap();
        assert!(!index.contains("42"));

        // Idempotent remove
        index.remove("42").await.unwrap();
        assert!(index.is_empty());
    }

    #[tokio::test]
    async fn test_ids_sorted() {
        let index = MemoryIndex::new("message");
        index.add("b").await.unwrap();
        index.add("a").await.unwrap();
        index.add("c").await.unwrap();

        assert_eq!(index.ids().await.unwrap(), vec!["a", "b", "c"]);
    }
}
