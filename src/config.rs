use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Inclusive bounds for `max_ranked_items`.
pub const MAX_RANKED_ITEMS_MIN: usize = 5;
pub const MAX_RANKED_ITEMS_MAX: usize = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct QuickMenuConfig {
    /// Raw identifiers to skip during collection; matched case-insensitively
    /// as substrings. Defaults cover structural placeholders.
    #[serde(default = "default_exclusion_ids")]
    pub exclusion_ids: Vec<String>,

    /// Substrings that exclude a leaf when found in its qualified
    /// `path + display name`. Defaults cover the quick menu's own entries
    /// and volatile dynamic lists.
    #[serde(default = "default_excluded_path_substrings")]
    pub excluded_path_substrings: Vec<String>,

    /// Size of the ranked shortlist. Valid range 5..=10.
    #[serde(default = "default_max_ranked_items")]
    pub max_ranked_items: usize,

    /// Path markers that earn a label suffix like " (Export)". Annotation
    /// never affects ranking or identity.
    #[serde(default = "default_special_group_markers")]
    pub special_group_markers: Vec<String>,
}

fn default_exclusion_ids() -> Vec<String> {
    vec![
        "separator".to_string(),
        "spacer".to_string(),
        "master_help".to_string(),
    ]
}

fn default_excluded_path_substrings() -> Vec<String> {
    vec!["Quick Menu".to_string(), "Reopen".to_string()]
}

fn default_max_ranked_items() -> usize {
    5
}

fn default_special_group_markers() -> Vec<String> {
    vec!["Import".to_string(), "Export".to_string()]
}

impl Default for QuickMenuConfig {
    fn default() -> Self {
        Self {
            exclusion_ids: default_exclusion_ids(),
            excluded_path_substrings: default_excluded_path_substrings(),
            max_ranked_items: default_max_ranked_items(),
            special_group_markers: default_special_group_markers(),
        }
    }
}

impl QuickMenuConfig {
    /// `max_ranked_items` forced into the valid range, for call sites that
    /// prefer best-effort presentation over a validation error.
    #[must_use]
    pub fn clamped_max_ranked_items(&self) -> usize {
        self.max_ranked_items
            .clamp(MAX_RANKED_ITEMS_MIN, MAX_RANKED_ITEMS_MAX)
    }
}

pub fn load_config_file(path: &Path) -> Option<QuickMenuConfig> {
    fs::read_to_string(path).ok().and_then(|s| {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase())
        {
            Some(ext) if ext == "yml" || ext == "yaml" => {
                serde_yaml::from_str::<QuickMenuConfig>(&s).ok()
            }
            Some(ext) if ext == "json" => serde_json::from_str::<QuickMenuConfig>(&s).ok(),
            _ => toml::from_str::<QuickMenuConfig>(&s).ok(),
        }
    })
}

#[must_use]
pub fn validate_config(cfg: &QuickMenuConfig) -> (Vec<String>, Vec<String>) {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if cfg.max_ranked_items < MAX_RANKED_ITEMS_MIN || cfg.max_ranked_items > MAX_RANKED_ITEMS_MAX {
        errors.push(format!(
            "max_ranked_items={} not in [{MAX_RANKED_ITEMS_MIN}, {MAX_RANKED_ITEMS_MAX}]",
            cfg.max_ranked_items
        ));
    }

    if cfg.exclusion_ids.iter().any(|s| s.trim().is_empty()) {
        warnings.push("exclusion_ids contains an empty entry; it matches every leaf".to_string());
    }
    if cfg
        .excluded_path_substrings
        .iter()
        .any(|s| s.trim().is_empty())
    {
        warnings.push(
            "excluded_path_substrings contains an empty entry; it matches every leaf".to_string(),
        );
    }
    if cfg
        .special_group_markers
        .iter()
        .any(|s| s.trim().is_empty())
    {
        warnings.push("special_group_markers contains an empty entry".to_string());
    }

    (errors, warnings)
}
