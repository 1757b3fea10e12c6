//! Cache module - Bound-object entity caching.
//!
//! The cache comes in two states:
//! - *Unbound* - a stateless accessor; every operation takes an explicit id
//! - *Bound* - wraps one already-fetched entity; identity-taking operations
//!   resolve the id from the bound entity instead of the argument
//!
//! Operations return new instances rather than mutating in place, so the
//! state an instance was created with is the state it keeps.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let cache: MessageCache<_, _> = EntityCache::new(engine, index);
//!
//! let created = cache.update("42", Message::new("hi")).await?;
//! let fetched = cache.get("42").await?; // Some(bound instance)
//! cache.remove("42").await?;
//! ```

mod binding;
mod entity_cache;

pub use binding::{Binding, KEY_SEPARATOR, scoped_key};
pub use entity_cache::{EntityCache, MessageCache};
