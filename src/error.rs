use thiserror::Error;

/// Programmer error in the registry's init/start/stop sequencing.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("quick menu is not initialized")]
    NotInitialized,
    #[error("quick menu is already initialized")]
    AlreadyInitialized,
}

/// A backing-store read/write failure. Surfaced once per store/restore
/// call; the in-memory session is never disrupted by one of these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("key/value store failure: {message}")]
pub struct StorageError {
    pub message: String,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One leaf that could not be turned into an action during collection.
/// These are soft: the walk records them and continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionFailure {
    pub path: String,
    pub raw_id: String,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum QuickMenuError {
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
