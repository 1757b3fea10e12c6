//! Base cache contract: binding state and key construction.

use std::sync::Arc;

/// Separator between the namespace and the id in a built key.
pub const KEY_SEPARATOR: char = '.';

/// Build the namespace-qualified key for an id.
///
/// This is the only key format the storage engine ever sees from the
/// cache layer. The namespace is a fixed prefix, so distinct ids always
/// yield distinct keys.
pub fn scoped_key(namespace: &str, id: &str) -> String {
    format!("{namespace}{KEY_SEPARATOR}{id}")
}

/// Binding state of a cache instance.
///
/// `Bound` owns a reference to exactly one entity, so a bound instance can
/// never hold "nothing" - absence is expressed by the operations returning
/// `None`, never by an empty binding.
pub enum Binding<T> {
    /// No entity reference; operations require an explicit id.
    Unbound,
    /// Wraps one fetched entity; identity resolves from it.
    Bound(Arc<T>),
}

// Manual Clone so T itself doesn't need to be Clone; the entity reference
// is shared, not copied.
impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Unbound => Self::Unbound,
            Self::Bound(entity) => Self::Bound(Arc::clone(entity)),
        }
    }
}

impl<T> Binding<T> {
    /// Whether this is the bound state.
    pub fn is_bound(&self) -> bool {
        matches!(self, Self::Bound(_))
    }

    /// The bound entity, if any.
    pub fn entity(&self) -> Option<&T> {
        match self {
            Self::Unbound => None,
            Self::Bound(entity) => Some(entity),
        }
    }
}

impl<T> std::fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unbound => f.write_str("Unbound"),
            Self::Bound(_) => f.write_str("Bound"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_key_format() {
        assert_eq!(scoped_key("message", "42"), "message.42");
    }

    #[test]
    fn test_scoped_key_injective() {
        let ids = ["1", "2", "42", "42x", "x42", ""];
        for a in ids {
            for b in ids {
                if a != b {
                    assert_ne!(scoped_key("message", a), scoped_key("message", b));
                }
            }
        }
    }

    #[test]
    fn test_scoped_key_deterministic() {
        assert_eq!(scoped_key("user", "7"), scoped_key("user", "7"));
    }

    #[test]
    fn test_binding_states() {
        let unbound: Binding<String> = Binding::Unbound;
        assert!(!unbound.is_bound());
        assert!(unbound.entity().is_none());

        let bound = Binding::Bound(Arc::new("hello".to_string()));
        assert!(bound.is_bound());
        assert_eq!(bound.entity().map(String::as_str), Some("hello"));
    }

    #[test]
    fn test_binding_clone_shares_entity() {
        let bound = Binding::Bound(Arc::new(7_u32));
        let cloned = bound.clone();
        let (Binding::Bound(a), Binding::Bound(b)) = (&bound, &cloned) else {
            panic!("expected both bound");
        };
        assert!(Arc::ptr_eq(a, b));
    }
}
