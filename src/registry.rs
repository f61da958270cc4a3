//! The stateful controller. One instance is wired by the host's composition
//! root and shared (behind `Arc`) with the instrumenter and the presenter.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::action_ref::ActionRef;
use crate::collect::collect;
use crate::config::QuickMenuConfig;
use crate::error::{CollectionFailure, LifecycleError, QuickMenuError};
use crate::host::{KeyValueStore, MenuNode};
use crate::storage::QuickMenuStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Initialized,
    Started,
    Stopped,
}

struct Inner {
    phase: Phase,
    actions: Vec<Arc<ActionRef>>,
    failures: Vec<CollectionFailure>,
}

/// Registry of every collected action and its click count.
///
/// Lifecycle: `Uninitialized → Initialized (init) → Started (start) →
/// Stopped (stop)`. Accessors before `init()` and a second `init()` are
/// lifecycle errors.
///
/// Renders read the list under a read lock; `sort()` takes the write lock,
/// so a reader never observes a list mid-sort. Click counters are atomic
/// and incremented without the list lock.
pub struct QuickMenu {
    config: QuickMenuConfig,
    storage: QuickMenuStorage,
    inner: RwLock<Inner>,
}

impl QuickMenu {
    #[must_use]
    pub fn new(config: QuickMenuConfig, store: Arc<dyn KeyValueStore + Send + Sync>) -> Self {
        Self {
            config,
            storage: QuickMenuStorage::new(store),
            inner: RwLock::new(Inner {
                phase: Phase::Uninitialized,
                actions: Vec::new(),
                failures: Vec::new(),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &QuickMenuConfig {
        &self.config
    }

    /// Collects the action list from `root`, merges persisted counts into it
    /// and sorts it. May run on a background worker before the GUI is
    /// interactive; the list is only published once fully merged.
    ///
    /// A restore failure is reported once and init proceeds with zero
    /// counts; persisted records with no collected counterpart are
    /// discarded.
    ///
    /// # Errors
    /// Returns `AlreadyInitialized` if called more than once.
    pub fn init(&self, root: &dyn MenuNode) -> Result<(), LifecycleError> {
        {
            let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
            if inner.phase != Phase::Uninitialized {
                return Err(LifecycleError::AlreadyInitialized);
            }
        }

        let collection = collect(root, &self.config);
        let mut actions: Vec<Arc<ActionRef>> =
            collection.actions.into_iter().map(Arc::new).collect();

        match self.storage.restore() {
            Ok(records) => {
                let by_id: HashMap<String, u64> = records
                    .into_iter()
                    .map(|r| (r.action_id, r.clicks))
                    .collect();
                for action in &actions {
                    if let Some(&clicks) = by_id.get(action.action_id()) {
                        action.set_clicks(clicks);
                    }
                }
            }
            Err(e) => warn!(error = %e, "restoring click counts failed; starting from zero"),
        }
        sort_actions(&mut actions);

        debug!(
            actions = actions.len(),
            skipped = collection.failures.len(),
            "quick menu initialized"
        );
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        // Re-check under the write lock: two racing init() calls may both
        // pass the fast-path guard, but only one may publish.
        if inner.phase != Phase::Uninitialized {
            return Err(LifecycleError::AlreadyInitialized);
        }
        inner.actions = actions;
        inner.failures = collection.failures;
        inner.phase = Phase::Initialized;
        Ok(())
    }

    /// Marks the registry live for click instrumentation (the GUI exists).
    ///
    /// # Errors
    /// Returns `NotInitialized` unless `init()` completed first.
    pub fn start(&self) -> Result<(), LifecycleError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.phase != Phase::Initialized {
            return Err(LifecycleError::NotInitialized);
        }
        inner.phase = Phase::Started;
        Ok(())
    }

    /// Persists current counts and discards the in-memory list. The
    /// registry is stopped even when persistence fails; the error is
    /// surfaced once so the host can log it.
    ///
    /// # Errors
    /// Returns `NotInitialized` before `init()`, or the single storage
    /// failure of the final write.
    pub fn stop(&self) -> Result<(), QuickMenuError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.phase == Phase::Uninitialized || inner.phase == Phase::Stopped {
            return Err(LifecycleError::NotInitialized.into());
        }
        let persisted = self.storage.store(&inner.actions);
        inner.actions = Vec::new();
        inner.failures = Vec::new();
        inner.phase = Phase::Stopped;
        if let Err(e) = persisted {
            warn!(error = %e, "persisting click counts failed; this session's counts are lost");
            return Err(e.into());
        }
        Ok(())
    }

    /// Snapshot of the live list in its current order.
    ///
    /// # Errors
    /// Returns `NotInitialized` before `init()` or after `stop()`.
    pub fn action_refs(&self) -> Result<Vec<Arc<ActionRef>>, LifecycleError> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        match inner.phase {
            Phase::Initialized | Phase::Started => Ok(inner.actions.clone()),
            _ => Err(LifecycleError::NotInitialized),
        }
    }

    /// Leaves skipped during collection, for host-side reporting.
    ///
    /// # Errors
    /// Returns `NotInitialized` before `init()` or after `stop()`.
    pub fn collection_failures(&self) -> Result<Vec<CollectionFailure>, LifecycleError> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        match inner.phase {
            Phase::Initialized | Phase::Started => Ok(inner.failures.clone()),
            _ => Err(LifecycleError::NotInitialized),
        }
    }

    /// Stable sort by clicks descending; ties keep their prior relative
    /// order so equal-count items do not jitter position.
    ///
    /// # Errors
    /// Returns `NotInitialized` before `init()` or after `stop()`.
    pub fn sort(&self) -> Result<(), LifecycleError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match inner.phase {
            Phase::Initialized | Phase::Started => {
                sort_actions(&mut inner.actions);
                Ok(())
            }
            _ => Err(LifecycleError::NotInitialized),
        }
    }

    /// Increments the named action's counter and re-sorts. Unknown ids are
    /// ignored (the leaf was never collected); returns whether a count was
    /// recorded.
    ///
    /// # Errors
    /// Returns `NotInitialized` before `init()` or after `stop()`.
    pub fn record_click(&self, action_id: &str) -> Result<bool, LifecycleError> {
        {
            let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
            match inner.phase {
                Phase::Initialized | Phase::Started => {}
                _ => return Err(LifecycleError::NotInitialized),
            }
            match inner.actions.iter().find(|a| a.action_id() == action_id) {
                Some(action) => action.increment_clicks(),
                None => return Ok(false),
            }
        }
        self.sort()?;
        Ok(true)
    }
}

fn sort_actions(actions: &mut [Arc<ActionRef>]) {
    // Snapshot counts first so the comparator stays consistent even if the
    // event thread increments mid-sort.
    let mut keyed: Vec<(Reverse<u64>, Arc<ActionRef>)> = actions
        .iter()
        .map(|a| (Reverse(a.clicks()), Arc::clone(a)))
        .collect();
    keyed.sort_by_key(|(key, _)| *key);
    for (slot, (_, action)) in actions.iter_mut().zip(keyed) {
        *slot = action;
    }
}
