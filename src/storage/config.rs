//! Reference-store configuration.

/// Configuration for an in-memory store instance.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum number of entries the store accepts.
    /// `None` means unbounded.
    pub max_entries: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { max_entries: None }
    }
}

impl StoreConfig {
    /// Create a config bounded at the given number of entries.
    pub fn bounded(max_entries: u64) -> Self {
        Self {
            max_entries: Some(max_entries),
        }
    }

    /// Set the entry bound (builder pattern).
    #[must_use]
    pub fn max_entries(mut self, max_entries: u64) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    /// Remove the entry bound.
    #[must_use]
    pub fn unbounded(mut self) -> Self {
        self.max_entries = None;
        self
    }
}
