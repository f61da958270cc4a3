//! Collaborator seams owned by the host application: the menu tree the
//! commands live in, and the key/value store the click counts persist to.

use std::collections::BTreeMap;
use std::sync::Mutex;

use thiserror::Error;

use crate::error::StorageError;

/// Namespaced key/value persistence. Hosts back this with their preference
/// mechanism; [`MemoryStore`] serves tests and hosts without one.
pub trait KeyValueStore {
    /// Writes one mapping.
    ///
    /// # Errors
    /// Returns error if the backing store rejects the write.
    fn put(&self, key: &str, value: u64) -> Result<(), StorageError>;

    /// Reads every persisted mapping.
    ///
    /// # Errors
    /// Returns error if the backing store cannot be read.
    fn get_all(&self) -> Result<BTreeMap<String, u64>, StorageError>;

    /// Removes every persisted mapping.
    ///
    /// # Errors
    /// Returns error if the backing store rejects the removal.
    fn clear(&self) -> Result<(), StorageError>;

    /// Commits pending writes.
    ///
    /// # Errors
    /// Returns error if the commit fails.
    fn flush(&self) -> Result<(), StorageError>;
}

/// The command a menu leaf stands for, as the host's command registry
/// resolves it.
#[derive(Debug, Clone)]
pub struct ResolvedCommand {
    /// Stable identifier, independent of where the command sits in the menu.
    pub action_id: String,
    /// Display label; may still carry shortcut indicators (`&`).
    pub display_name: String,
}

/// A leaf that does not stand for a real command (e.g. a broken shortcut).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct ResolveError {
    pub reason: String,
}

impl ResolveError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Read-only view of one node in the host's menu tree. The crate only ever
/// walks and resolves; rendering and dispatch stay with the host.
pub trait MenuNode {
    fn is_leaf(&self) -> bool;

    fn children(&self) -> Vec<&dyn MenuNode>;

    /// Raw identifier as the menu definition spells it, before any command
    /// resolution. Exclusion rules match against this.
    fn raw_id(&self) -> &str;

    /// Resolves the command behind a leaf.
    ///
    /// # Errors
    /// Returns error for leaves that do not stand for a real command; the
    /// collector records the reason and walks on.
    fn resolve(&self) -> Result<ResolvedCommand, ResolveError>;
}

/// In-memory [`KeyValueStore`] for tests and hosts without a preference
/// backend.
#[derive(Debug, Default)]
pub struct MemoryStore(Mutex<BTreeMap<String, u64>>);

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn put(&self, key: &str, value: u64) -> Result<(), StorageError> {
        let mut map = self
            .0
            .lock()
            .map_err(|_| StorageError::new("store lock poisoned"))?;
        map.insert(key.to_string(), value);
        Ok(())
    }

    fn get_all(&self) -> Result<BTreeMap<String, u64>, StorageError> {
        let map = self
            .0
            .lock()
            .map_err(|_| StorageError::new("store lock poisoned"))?;
        Ok(map.clone())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut map = self
            .0
            .lock()
            .map_err(|_| StorageError::new("store lock poisoned"))?;
        map.clear();
        Ok(())
    }

    fn flush(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
