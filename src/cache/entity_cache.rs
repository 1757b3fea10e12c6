//! Generic entity cache over a storage engine and an id index.

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use super::binding::{Binding, scoped_key};
use crate::model::{Entity, Message};
use crate::storage::{KeyIndex, StorageEngine};

/// Cache for the `Message` entity kind.
pub type MessageCache<S, I> = EntityCache<Message, S, I>;

/// A cache instance for one entity kind.
///
/// Holds shared handles to the storage engine and the namespace index,
/// plus a [`Binding`] deciding how identity is resolved. Cloning is cheap:
/// the collaborators and any bound entity are shared, not copied.
///
/// Persistence is delegated to the engine, id bookkeeping to the index.
/// The two are kept in sync with a fixed ordering (index first, store
/// second, on both write and delete) but not transactionally; see
/// [`EntityCache::reconcile`] for the cleanup path after a partial
/// failure.
pub struct EntityCache<T, S, I> {
    engine: Arc<S>,
    index: Arc<I>,
    binding: Binding<T>,
}

impl<T, S, I> Clone for EntityCache<T, S, I> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            index: Arc::clone(&self.index),
            binding: self.binding.clone(),
        }
    }
}

impl<T, S, I> EntityCache<T, S, I>
where
    T: Entity,
    S: StorageEngine<T>,
    I: KeyIndex,
{
    /// Create an unbound cache over the given collaborators.
    pub fn new(engine: Arc<S>, index: Arc<I>) -> Self {
        Self {
            engine,
            index,
            binding: Binding::Unbound,
        }
    }

    /// Create a cache already bound to `entity`.
    pub fn bound(engine: Arc<S>, index: Arc<I>, entity: T) -> Self {
        Self {
            engine,
            index,
            binding: Binding::Bound(Arc::new(entity)),
        }
    }

    /// Return a new instance bound to `entity`, sharing this instance's
    /// collaborators. Works on bound and unbound instances alike; the
    /// callee is left untouched.
    pub fn bind(&self, entity: T) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            index: Arc::clone(&self.index),
            binding: Binding::Bound(Arc::new(entity)),
        }
    }

    /// Whether this instance is bound to an entity.
    pub fn is_bound(&self) -> bool {
        self.binding.is_bound()
    }

    /// The bound entity, if any.
    pub fn entity(&self) -> Option<&T> {
        self.binding.entity()
    }

    /// Build the namespace-qualified storage key for an id.
    pub fn build_id(id: &str) -> String {
        scoped_key(T::NAMESPACE, id)
    }

    /// Get the entity with the given id.
    ///
    /// On a bound instance this short-circuits: the id is ignored and a
    /// clone of this instance is returned without touching storage. On an
    /// unbound instance a storage miss is `Ok(None)`, a hit a new bound
    /// instance.
    pub async fn get(&self, id: &str) -> Result<Option<Self>> {
        if self.binding.is_bound() {
            return Ok(Some(self.clone()));
        }

        let key = Self::build_id(id);
        match self.engine.get(&key).await? {
            Some(entity) => Ok(Some(self.bind(entity))),
            None => {
                debug!("No {} entity under id {id}", T::NAMESPACE);
                Ok(None)
            }
        }
    }

    /// Create or overwrite the entity with the given id.
    ///
    /// The id is written into `data` when absent. The index learns the id
    /// before the store is touched, so a failed upsert can leave a
    /// dangling index entry (swept by [`Self::reconcile`]) but never a
    /// stored entity the index doesn't know about.
    ///
    /// On a bound instance `data` is what gets rebound, so its own id
    /// wins over the caller-supplied one when it carries any.
    pub async fn update(&self, id: &str, mut data: T) -> Result<Self> {
        let id = match (self.binding.is_bound(), data.id()) {
            (true, Some(own)) => own.to_owned(),
            _ => id.to_owned(),
        };

        if data.id().is_none() {
            data.set_id(id.clone());
        }

        self.index.add(&id).await?;

        let key = Self::build_id(&id);
        self.engine.upsert(&key, &data).await?;
        debug!("Upserted {} entity {id}", T::NAMESPACE);

        Ok(self.bind(data))
    }

    /// Remove the entity with the given id.
    ///
    /// A bound instance removes the entity it wraps, whatever id was
    /// passed. A missing entity is `Ok(None)` and leaves the index alone.
    /// Otherwise the index forgets the id before the store does, same
    /// ordering as [`Self::update`].
    pub async fn remove(&self, id: &str) -> Result<Option<T>> {
        let id = match self.binding.entity().and_then(Entity::id) {
            Some(own) => own.to_owned(),
            None => id.to_owned(),
        };

        let key = Self::build_id(&id);
        if self.engine.get(&key).await?.is_none() {
            debug!("Remove of missing {} entity {id} is a no-op", T::NAMESPACE);
            return Ok(None);
        }

        self.index.remove(&id).await?;
        let removed = self.engine.remove(&key).await?;
        debug!("Removed {} entity {id}", T::NAMESPACE);

        Ok(removed)
    }

    /// All entities matching `predicate`, each wrapped in a bound
    /// instance.
    ///
    /// `ids` restricts the search to those ids; `None` searches everything
    /// the engine holds. Order is whatever the engine yields. Read-only,
    /// the index is never touched.
    pub async fn filter<P>(&self, predicate: P, ids: Option<&[&str]>) -> Result<Vec<Self>>
    where
        P: Fn(&T) -> bool + Sync,
    {
        let keys = ids.map(|ids| ids.iter().map(|id| Self::build_id(id)).collect::<Vec<_>>());
        let matches = self.engine.filter(&predicate, keys.as_deref()).await?;

        Ok(matches.into_iter().map(|entity| self.bind(entity)).collect())
    }

    /// First entity matching `predicate`, wrapped in a bound instance, or
    /// `None` - never a bound instance around nothing.
    pub async fn find<P>(&self, predicate: P, ids: Option<&[&str]>) -> Result<Option<Self>>
    where
        P: Fn(&T) -> bool + Sync,
    {
        let keys = ids.map(|ids| ids.iter().map(|id| Self::build_id(id)).collect::<Vec<_>>());
        let found = self.engine.find(&predicate, keys.as_deref()).await?;

        Ok(found.map(|entity| self.bind(entity)))
    }

    /// Drop every index id with no backing entity in storage.
    ///
    /// The index/store pair is not transactional: a storage failure after
    /// a successful index mutation strands the id. Callers needing strict
    /// consistency run this afterwards. Returns the number of ids dropped.
    pub async fn reconcile(&self) -> Result<usize> {
        let mut dropped = 0;

        for id in self.index.ids().await? {
            let key = Self::build_id(&id);
            if self.engine.get(&key).await?.is_none() {
                self.index.remove(&id).await?;
                dropped += 1;
            }
        }

        if dropped > 0 {
            debug!("Reconciled {} index, dropped {dropped} dangling ids", T::NAMESPACE);
        }

        Ok(dropped)
    }
}

impl<T, S, I> std::fmt::Debug for EntityCache<T, S, I>
where
    T: Entity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityCache")
            .field("namespace", &T::NAMESPACE)
            .field("binding", &self.binding)
            .finish()
    }
}
