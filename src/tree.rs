//! Concrete menu tree for hosts that describe their menus in config files
//! (TOML/YAML/JSON) and for tests. Hosts with a native menu widget tree
//! implement [`MenuNode`] directly instead.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::host::{MenuNode, ResolveError, ResolvedCommand};

#[derive(Debug, Deserialize, Clone)]
pub struct MenuItem {
    /// Display label; may carry shortcut indicators (`&`).
    pub name: String,
    /// Stable action id. Leaves without one do not resolve to a command.
    #[serde(default)]
    pub id: Option<String>,
    /// Raw identifier for exclusion matching; defaults to `name`.
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default, alias = "children")]
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Deserialize)]
pub struct MenuFile {
    #[serde(default)]
    pub menu: Vec<MenuItem>,
}

impl MenuNode for MenuItem {
    fn is_leaf(&self) -> bool {
        self.items.is_empty()
    }

    fn children(&self) -> Vec<&dyn MenuNode> {
        self.items.iter().map(|it| it as &dyn MenuNode).collect()
    }

    fn raw_id(&self) -> &str {
        self.raw.as_deref().unwrap_or(&self.name)
    }

    fn resolve(&self) -> Result<ResolvedCommand, ResolveError> {
        match &self.id {
            Some(id) if !id.trim().is_empty() => Ok(ResolvedCommand {
                action_id: id.clone(),
                display_name: self.name.clone(),
            }),
            _ => Err(ResolveError::new("leaf has no action id")),
        }
    }
}

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("failed to read menu file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse menu file: {0}")]
    Parse(String),
    #[error("unsupported menu file format")]
    UnsupportedFormat,
}

/// Loads a menu tree from a TOML/YAML/JSON file and wraps it under a single
/// root node named `Menu`.
///
/// # Errors
/// Returns error if file reading or parsing fails.
pub fn load_tree(path: &Path) -> Result<MenuItem, TreeError> {
    let contents = fs::read_to_string(path)?;
    let file = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase())
    {
        Some(ext) if ext == "yml" || ext == "yaml" => serde_yaml::from_str::<MenuFile>(&contents)
            .map_err(|e| TreeError::Parse(e.to_string()))?,
        Some(ext) if ext == "json" => serde_json::from_str::<MenuFile>(&contents)
            .map_err(|e| TreeError::Parse(e.to_string()))?,
        Some(ext) if ext == "toml" => {
            toml::from_str::<MenuFile>(&contents).map_err(|e| TreeError::Parse(e.to_string()))?
        }
        _ => return Err(TreeError::UnsupportedFormat),
    };
    Ok(MenuItem {
        name: "Menu".to_string(),
        id: None,
        raw: None,
        items: file.menu,
    })
}

/// Validates tree structure and semantics. Returns a list of human-readable
/// issues.
#[must_use]
pub fn validate_tree(root: &[MenuItem]) -> Vec<String> {
    use std::collections::HashSet;
    let mut issues: Vec<String> = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut dup_ids: HashSet<String> = HashSet::new();

    fn walk(
        items: &[MenuItem],
        path: &mut Vec<String>,
        seen: &mut std::collections::HashSet<String>,
        dups: &mut std::collections::HashSet<String>,
        out: &mut Vec<String>,
    ) {
        for it in items {
            path.push(it.name.clone());
            let here = path.join(" > ");

            let has_items = !it.items.is_empty();
            let has_id = it.id.as_ref().is_some_and(|s| !s.trim().is_empty());

            if has_items && has_id {
                out.push(format!(
                    "Menu item '{here}' cannot have 'items' together with 'id'"
                ));
            }
            if !has_items && !has_id {
                out.push(format!(
                    "Menu item '{here}' has no action ('id') and no 'items'"
                ));
            }

            if let Some(id) = it.id.as_ref().filter(|s| !s.trim().is_empty()) {
                let key = id.trim().to_string();
                if !seen.insert(key.clone()) {
                    dups.insert(key);
                }
            }

            if !it.items.is_empty() {
                walk(&it.items, path, seen, dups, out);
            }
            path.pop();
        }
    }

    let mut path: Vec<String> = Vec::new();
    walk(root, &mut path, &mut seen_ids, &mut dup_ids, &mut issues);

    if !dup_ids.is_empty() {
        let mut v: Vec<String> = dup_ids.into_iter().collect();
        v.sort_unstable();
        issues.push(format!(
            "Duplicate action ids (these merge into one quick-menu entry): {}",
            v.join(", ")
        ));
    }

    issues
}
