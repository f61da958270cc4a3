use std::sync::Arc;

use crate::action_ref::ActionRef;
use crate::error::StorageError;
use crate::host::KeyValueStore;

/// Flat persisted record: one action id and its click count. Knows nothing
/// about menu placements; correlation with live actions is the registry's
/// merge step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCount {
    pub action_id: String,
    pub clicks: u64,
}

/// Persists click counts into a namespaced key/value store. Only actions
/// with a non-zero count are written, so storage stays proportional to
/// actual usage rather than catalog size.
pub struct QuickMenuStorage {
    store: Arc<dyn KeyValueStore + Send + Sync>,
}

impl QuickMenuStorage {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore + Send + Sync>) -> Self {
        Self { store }
    }

    /// Replaces the persisted set with the current non-zero counts.
    ///
    /// The previous mapping is cleared only immediately before the new set
    /// is written, so a failure earlier in the call leaves the store as it
    /// was.
    ///
    /// # Errors
    /// Returns error once per call if the backing store fails; the caller's
    /// in-memory counts are unaffected.
    pub fn store(&self, actions: &[Arc<ActionRef>]) -> Result<(), StorageError> {
        let live: Vec<(&str, u64)> = actions
            .iter()
            .map(|a| (a.action_id(), a.clicks()))
            .filter(|(_, n)| *n > 0)
            .collect();

        self.store.clear()?;
        for (id, clicks) in live {
            self.store.put(id, clicks)?;
        }
        self.store.flush()
    }

    /// Reads every persisted `(action_id, clicks)` record.
    ///
    /// # Errors
    /// Returns error if the backing store cannot be read; the registry then
    /// proceeds with zero counts.
    pub fn restore(&self) -> Result<Vec<StoredCount>, StorageError> {
        let map = self.store.get_all()?;
        Ok(map
            .into_iter()
            .map(|(action_id, clicks)| StoredCount { action_id, clicks })
            .collect())
    }
}
