use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::menu_ref::MenuRef;

/// Identity record for one logical command: a stable action id, every menu
/// placement it is reachable from, and its click counter.
///
/// The counter is atomic so the event thread can increment without holding
/// the registry's list lock. Placements are appended only during collection,
/// before the record is shared.
#[derive(Debug)]
pub struct ActionRef {
    action_id: String,
    menu_refs: Vec<MenuRef>,
    clicks: AtomicU64,
}

impl ActionRef {
    #[must_use]
    pub fn new(action_id: impl Into<String>, menu_ref: MenuRef) -> Self {
        Self {
            action_id: action_id.into(),
            menu_refs: vec![menu_ref],
            clicks: AtomicU64::new(0),
        }
    }

    pub fn add_menu_ref(&mut self, menu_ref: MenuRef) {
        self.menu_refs.push(menu_ref);
    }

    pub fn increment_clicks(&self) {
        self.clicks.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn clicks(&self) -> u64 {
        self.clicks.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn menu_refs(&self) -> &[MenuRef] {
        &self.menu_refs
    }

    #[must_use]
    pub fn action_id(&self) -> &str {
        &self.action_id
    }

    /// Overwrites the counter. Reserved for the registry's merge of
    /// persisted counts after collection.
    pub(crate) fn set_clicks(&self, clicks: u64) {
        self.clicks.store(clicks, Ordering::Relaxed);
    }
}

// Identity is (action_id, menu_refs); the live counter does not take part.
impl PartialEq for ActionRef {
    fn eq(&self, other: &Self) -> bool {
        self.action_id == other.action_id && self.menu_refs == other.menu_refs
    }
}

impl Eq for ActionRef {}

impl Hash for ActionRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.action_id.hash(state);
        self.menu_refs.hash(state);
    }
}
