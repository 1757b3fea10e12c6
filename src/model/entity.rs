//! Contract every cacheable entity kind satisfies.

/// A cacheable entity kind.
///
/// Each kind declares a fixed namespace scoping its storage keys, so
/// multiple kinds can share one storage engine without collisions, and
/// exposes its identifier. The id is optional until the entity has been
/// persisted; the cache assigns one on first write.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Key-scoping prefix for this kind. Fixed for the life of the type.
    const NAMESPACE: &'static str;

    /// The entity's identifier, if it has been assigned.
    fn id(&self) -> Option<&str>;

    /// Assign the identifier.
    fn set_id(&mut self, id: String);
}
