use std::sync::Arc;

use crate::action_ref::ActionRef;
use crate::error::LifecycleError;
use crate::registry::QuickMenu;

/// One rendered shortlist row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickMenuEntry {
    pub action_id: String,
    pub label: String,
    pub clicks: u64,
}

/// What the host renders when the menu opens: either the ranked rows, or an
/// explicit empty marker (rendered as a disabled placeholder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickMenuView {
    Empty,
    Items(Vec<QuickMenuEntry>),
}

/// Builds the ranked, size-limited, labeled view from the registry's
/// current ordering. No re-sort happens here; it trusts the registry's
/// last sort.
pub struct QuickMenuPresenter {
    registry: Arc<QuickMenu>,
}

impl QuickMenuPresenter {
    #[must_use]
    pub fn new(registry: Arc<QuickMenu>) -> Self {
        Self { registry }
    }

    /// The first `n` actions with at least one click, in the registry's
    /// current order. Fewer qualify, fewer returned; none, `Empty`.
    ///
    /// # Errors
    /// Returns `NotInitialized` if the registry holds no list.
    pub fn present(&self, n: usize) -> Result<QuickMenuView, LifecycleError> {
        let markers = &self.registry.config().special_group_markers;
        let entries: Vec<QuickMenuEntry> = self
            .registry
            .action_refs()?
            .iter()
            .filter(|a| a.clicks() > 0)
            .take(n)
            .map(|a| QuickMenuEntry {
                action_id: a.action_id().to_string(),
                label: label_for(a, markers),
                clicks: a.clicks(),
            })
            .collect();
        if entries.is_empty() {
            Ok(QuickMenuView::Empty)
        } else {
            Ok(QuickMenuView::Items(entries))
        }
    }

    /// [`present`](Self::present) with the configured shortlist size,
    /// clamped into its valid range.
    ///
    /// # Errors
    /// Returns `NotInitialized` if the registry holds no list.
    pub fn present_default(&self) -> Result<QuickMenuView, LifecycleError> {
        self.present(self.registry.config().clamped_max_ranked_items())
    }
}

/// Label is the first placement's text, annotated with a group suffix when
/// any placement path contains a configured marker.
fn label_for(action: &ActionRef, markers: &[String]) -> String {
    let text = action
        .menu_refs()
        .first()
        .map(|m| m.text().to_string())
        .unwrap_or_default();
    let group = markers.iter().find(|marker| {
        action
            .menu_refs()
            .iter()
            .any(|m| m.path().contains(marker.as_str()))
    });
    match group {
        Some(marker) => format!("{text} ({marker})"),
        None => text,
    }
}
