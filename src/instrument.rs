//! Lazy click instrumentation. Most submenus are never opened in a session,
//! so nothing is wired until the user first enters a top-level item; the
//! armed set makes re-entry a no-op.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::error::LifecycleError;
use crate::menu_ref::normalize;
use crate::registry::QuickMenu;

/// Wires click counting for menu leaves, one top-level subtree at a time.
///
/// The host forwards two events: entry into a top-level item
/// ([`submenu_entered`](Self::submenu_entered)) and a click on a leaf
/// ([`clicked`](Self::clicked)). Placements are matched by the `MenuRef`
/// paths the collector recorded, so no second tree walk happens here.
pub struct ClickInstrumenter {
    registry: Arc<QuickMenu>,
    /// Top-level items already wired this session.
    armed: Mutex<HashSet<String>>,
    /// `(path, normalized text) → action id` for every wired leaf.
    wired: Mutex<HashMap<(String, String), String>>,
}

impl ClickInstrumenter {
    #[must_use]
    pub fn new(registry: Arc<QuickMenu>) -> Self {
        Self {
            registry,
            armed: Mutex::new(HashSet::new()),
            wired: Mutex::new(HashMap::new()),
        }
    }

    /// Arms every collected leaf under the named top-level item. Idempotent:
    /// a second entry into an already-armed item wires nothing.
    ///
    /// # Errors
    /// Returns `NotInitialized` if the registry holds no list.
    pub fn submenu_entered(&self, top_level: &str) -> Result<(), LifecycleError> {
        let top_level = normalize(top_level);
        let mut armed = self.armed.lock().unwrap_or_else(PoisonError::into_inner);
        if armed.contains(&top_level) {
            return Ok(());
        }

        // Arm only after the registry lookup succeeds: a hover forwarded
        // before init() completes must leave this item un-armed so a later
        // entry still wires it.
        let actions = self.registry.action_refs()?;
        let mut wired = self.wired.lock().unwrap_or_else(PoisonError::into_inner);
        let mut count = 0usize;
        for action in &actions {
            for menu_ref in action.menu_refs() {
                if top_level_of(menu_ref.path()) == Some(top_level.as_str()) {
                    wired.insert(
                        (menu_ref.path().to_string(), menu_ref.text().to_string()),
                        action.action_id().to_string(),
                    );
                    count += 1;
                }
            }
        }
        debug!(top_level, leaves = count, "armed submenu");
        armed.insert(top_level);
        Ok(())
    }

    /// Records a click on the leaf at `path`/`text`, incrementing its action
    /// and triggering a registry re-sort. Clicks on unwired leaves are
    /// ignored; returns whether a count was recorded.
    ///
    /// # Errors
    /// Returns `NotInitialized` if the registry holds no list.
    pub fn clicked(&self, path: &str, text: &str) -> Result<bool, LifecycleError> {
        let action_id = {
            let wired = self.wired.lock().unwrap_or_else(PoisonError::into_inner);
            // Wired keys come from the collector, whose paths are already
            // `&`-stripped; normalize both halves of the lookup to match.
            wired.get(&(normalize(path), normalize(text))).cloned()
        };
        match action_id {
            Some(id) => self.registry.record_click(&id),
            None => Ok(false),
        }
    }

    /// Whether the named top-level item has been wired this session.
    #[must_use]
    pub fn is_armed(&self, top_level: &str) -> bool {
        self.armed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&normalize(top_level))
    }
}

/// Second segment of a collected path, e.g. `"Tools"` for
/// `"Menu/Tools/Geometric/"`. The first segment is the root.
fn top_level_of(path: &str) -> Option<&str> {
    path.split('/').filter(|s| !s.is_empty()).nth(1)
}
