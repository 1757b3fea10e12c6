//! Storage-engine capability contract.

use anyhow::Result;
use async_trait::async_trait;

/// Capabilities any storage backend must provide.
///
/// Keys are opaque to the engine; the cache layer builds them as
/// `namespace.id` and the engine must not interpret them. Failures are
/// the engine's own and reach the caller unmodified.
#[async_trait]
pub trait StorageEngine<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    /// Fetch the entity at `key`. No side effects.
    async fn get(&self, key: &str) -> Result<Option<T>>;

    /// Create or overwrite the entity at `key`, atomically for that key.
    async fn upsert(&self, key: &str, entity: &T) -> Result<()>;

    /// Remove the entity at `key`, returning it. Idempotent: a missing
    /// key is `Ok(None)`, not an error.
    async fn remove(&self, key: &str) -> Result<Option<T>>;

    /// All entities matching `predicate`, restricted to `keys` when
    /// given. Read-only; order is the engine's to choose.
    async fn filter(
        &self,
        predicate: &(dyn for<'a> Fn(&'a T) -> bool + Sync),
        keys: Option<&[String]>,
    ) -> Result<Vec<T>>;

    /// First entity matching `predicate`, restricted to `keys` when
    /// given. Read-only, short-circuits on the first match.
    async fn find(
        &self,
        predicate: &(dyn for<'a> Fn(&'a T) -> bool + Sync),
        keys: Option<&[String]>,
    ) -> Result<Option<T>>;
}
