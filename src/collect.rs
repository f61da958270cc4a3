//! One depth-first pre-order walk of the host menu tree, producing the
//! deduplicated action list the registry ranks.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::action_ref::ActionRef;
use crate::config::QuickMenuConfig;
use crate::error::CollectionFailure;
use crate::host::MenuNode;
use crate::menu_ref::{normalize, MenuRef};

/// Result of one collection pass: the actions in discovery order, plus every
/// leaf that had to be skipped because it did not resolve. Exclusion-rule
/// skips are deliberate and not recorded here.
#[derive(Debug, Default)]
pub struct Collection {
    pub actions: Vec<ActionRef>,
    pub failures: Vec<CollectionFailure>,
}

/// Walks the tree rooted at `root` exactly once. A leaf that fails to
/// resolve is recorded and skipped; the rest of the tree is still collected.
///
/// A command reachable from several paths yields one [`ActionRef`] carrying
/// one [`MenuRef`] per placement, deduplicated by action id.
#[must_use]
pub fn collect(root: &dyn MenuNode, cfg: &QuickMenuConfig) -> Collection {
    let mut actions: Vec<ActionRef> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut failures: Vec<CollectionFailure> = Vec::new();

    fn excluded_id(raw: &str, ids: &[String]) -> bool {
        let raw = raw.to_lowercase();
        ids.iter().any(|p| raw.contains(&p.to_lowercase()))
    }

    fn walk(
        node: &dyn MenuNode,
        path: &str,
        cfg: &QuickMenuConfig,
        actions: &mut Vec<ActionRef>,
        index: &mut HashMap<String, usize>,
        failures: &mut Vec<CollectionFailure>,
    ) {
        for child in node.children() {
            if !child.is_leaf() {
                let sub = format!("{path}{}/", normalize(child.raw_id()));
                walk(child, &sub, cfg, actions, index, failures);
                continue;
            }

            let raw = child.raw_id();
            if excluded_id(raw, &cfg.exclusion_ids) {
                debug!(raw, path, "skipping excluded identifier");
                continue;
            }

            let resolved = match child.resolve() {
                Ok(r) => r,
                Err(e) => {
                    warn!(raw, path, reason = %e, "leaf did not resolve; skipping");
                    failures.push(CollectionFailure {
                        path: path.to_string(),
                        raw_id: raw.to_string(),
                        reason: e.reason,
                    });
                    continue;
                }
            };
            let text = normalize(&resolved.display_name);
            if text.trim().is_empty() {
                warn!(raw, path, "leaf has a blank display name; skipping");
                failures.push(CollectionFailure {
                    path: path.to_string(),
                    raw_id: raw.to_string(),
                    reason: "blank display name".to_string(),
                });
                continue;
            }

            let qualified = format!("{path}{text}");
            if cfg
                .excluded_path_substrings
                .iter()
                .any(|p| qualified.contains(p.as_str()))
            {
                debug!(%qualified, "skipping excluded path");
                continue;
            }

            let menu_ref = MenuRef::new(path, &resolved.display_name);
            match index.get(&resolved.action_id).copied() {
                Some(i) => actions[i].add_menu_ref(menu_ref),
                None => {
                    index.insert(resolved.action_id.clone(), actions.len());
                    actions.push(ActionRef::new(resolved.action_id, menu_ref));
                }
            }
        }
    }

    let root_path = format!("{}/", normalize(root.raw_id()));
    walk(
        root,
        &root_path,
        cfg,
        &mut actions,
        &mut index,
        &mut failures,
    );

    Collection { actions, failures }
}
