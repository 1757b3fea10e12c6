//! Mnemosyne - Bound-object entity cache
//!
//! A generic entity cache layered over a pluggable storage backend,
//! keeping a per-namespace index of known ids in sync with the store.
//!
//! ## Architecture
//!
//! - `cache` - The core: bound/unbound cache instances and operations
//! - `model` - Entity contract and the `Message` domain model
//! - `storage` - Storage-engine and index contracts + in-memory impls
//!
//! A cache instance is either *unbound* (every call takes an explicit id)
//! or *bound* (wraps one fetched entity and resolves identity from it).
//! Operations never mutate the instance they are called on; they return a
//! new instance bound to the result.

pub mod cache;
pub mod model;
pub mod storage;

pub use cache::{Binding, EntityCache, MessageCache};
pub use model::{Entity, Message};
pub use storage::{KeyIndex, MemoryIndex, MemoryStore, StorageEngine, StoreConfig, StoreError};
