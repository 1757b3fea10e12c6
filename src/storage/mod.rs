//! Storage module - collaborator contracts and in-memory implementations.
//!
//! The cache core consumes two capability contracts:
//! - [`StorageEngine`] - canonical persistence, keyed by opaque strings
//! - [`KeyIndex`] - the set of ids known under one namespace
//!
//! [`MemoryStore`] and [`MemoryIndex`] are the shipped reference
//! implementations; production backends implement the same traits.

mod config;
mod engine;
mod index;
mod memory;

pub use config::StoreConfig;
pub use engine::StorageEngine;
pub use index::{KeyIndex, MemoryIndex};
pub use memory::{MemoryStore, StoreError};
