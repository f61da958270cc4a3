use std::fs;

use quickmenu::config::{load_config_file, validate_config};
use quickmenu::menu_ref::normalize;
use quickmenu::tree::{load_tree, validate_tree};
use quickmenu::{collect, MenuItem, MenuRef, QuickMenuConfig};

fn leaf(name: &str, id: &str) -> MenuItem {
    MenuItem {
        name: name.to_string(),
        id: Some(id.to_string()),
        raw: None,
        items: Vec::new(),
    }
}

fn folder(name: &str, items: Vec<MenuItem>) -> MenuItem {
    MenuItem {
        name: name.to_string(),
        id: None,
        raw: None,
        items,
    }
}

fn root(items: Vec<MenuItem>) -> MenuItem {
    folder("Menu", items)
}

#[test]
fn normalize_strips_shortcut_indicators_and_is_idempotent() {
    assert_eq!(normalize("&Copy"), "Copy");
    assert_eq!(normalize("Save &As…"), "Save As…");
    assert_eq!(normalize(normalize("&A && &B").as_str()), normalize("&A && &B"));
    assert_eq!(normalize("plain"), "plain");
}

#[test]
fn menu_ref_equality_is_over_path_and_normalized_text() {
    let a = MenuRef::new("Menu/Tools/", "&Rotate");
    let b = MenuRef::new("Menu/Tools/", "Rotate");
    let c = MenuRef::new("Menu/Edit/", "Rotate");
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn collector_dedups_same_action_id_under_two_paths() {
    let tree = root(vec![
        folder("Tools", vec![leaf("&Copy", "edit.copy")]),
        folder("Extra", vec![leaf("Copy", "edit.copy")]),
    ]);
    let col = collect(&tree, &QuickMenuConfig::default());
    assert_eq!(col.actions.len(), 1);
    assert!(col.failures.is_empty());
    let action = &col.actions[0];
    assert_eq!(action.action_id(), "edit.copy");
    assert_eq!(action.menu_refs().len(), 2);
    assert_eq!(action.menu_refs()[0].path(), "Menu/Tools/");
    assert_eq!(action.menu_refs()[0].text(), "Copy");
    assert_eq!(action.menu_refs()[1].path(), "Menu/Extra/");
}

#[test]
fn collector_skips_excluded_identifiers_case_insensitively() {
    let mut sep = leaf("---", "noop");
    sep.raw = Some("SEPARATOR_1".to_string());
    let tree = root(vec![folder(
        "Tools",
        vec![sep, leaf("Rotate", "tools.rotate")],
    )]);
    let col = collect(&tree, &QuickMenuConfig::default());
    assert_eq!(col.actions.len(), 1);
    assert_eq!(col.actions[0].action_id(), "tools.rotate");
    // Exclusion-rule skips are deliberate, not failures.
    assert!(col.failures.is_empty());
}

#[test]
fn collector_skips_excluded_path_substrings() {
    let tree = root(vec![
        folder("Quick Menu", vec![leaf("Rotate", "tools.rotate")]),
        folder("File", vec![leaf("Reopen latest", "file.reopen.0")]),
        folder("Tools", vec![leaf("Rotate", "tools.rotate")]),
    ]);
    let col = collect(&tree, &QuickMenuConfig::default());
    assert_eq!(col.actions.len(), 1);
    assert_eq!(col.actions[0].menu_refs()[0].path(), "Menu/Tools/");
}

#[test]
fn collector_records_soft_failures_and_keeps_walking() {
    let broken = MenuItem {
        name: "Dangling shortcut".to_string(),
        id: None,
        raw: None,
        items: Vec::new(),
    };
    let blank = leaf("   ", "tools.blank");
    let tree = root(vec![folder(
        "Tools",
        vec![broken, blank, leaf("Rotate", "tools.rotate")],
    )]);
    let col = collect(&tree, &QuickMenuConfig::default());
    assert_eq!(col.actions.len(), 1);
    assert_eq!(col.actions[0].action_id(), "tools.rotate");
    assert_eq!(col.failures.len(), 2);
    assert_eq!(col.failures[0].path, "Menu/Tools/");
    assert_eq!(col.failures[0].reason, "leaf has no action id");
    assert_eq!(col.failures[1].reason, "blank display name");
}

#[test]
fn tree_loads_from_yaml_and_toml() {
    let tmp = tempfile::tempdir().unwrap();
    let y = tmp.path().join("menu.yaml");
    fs::write(
        &y,
        "menu:\n  - name: Tools\n    items:\n      - name: Rotate\n        id: tools.rotate\n",
    )
    .unwrap();
    let t1 = load_tree(&y).unwrap();
    assert_eq!(t1.items.len(), 1);
    assert_eq!(t1.items[0].items[0].id.as_deref(), Some("tools.rotate"));

    let t = tmp.path().join("menu.toml");
    fs::write(
        &t,
        "menu = [{ name = 'Tools', items = [{ name = 'Rotate', id = 'tools.rotate' }] }]\n",
    )
    .unwrap();
    let t2 = load_tree(&t).unwrap();
    assert_eq!(t2.items[0].name, "Tools");
    assert_eq!(t2.name, "Menu");
}

#[test]
fn tree_validation_reports_structural_issues() {
    let mut bad_folder = folder("Tools", vec![leaf("Rotate", "tools.rotate")]);
    bad_folder.id = Some("tools".to_string());
    let no_action = MenuItem {
        name: "Empty".to_string(),
        id: None,
        raw: None,
        items: Vec::new(),
    };
    let issues = validate_tree(&[bad_folder, no_action]);
    assert_eq!(issues.len(), 2);
    assert!(issues[0].contains("cannot have 'items' together with 'id'"));
    assert!(issues[1].contains("has no action"));
}

#[test]
fn config_defaults_and_file_loading() {
    let cfg = QuickMenuConfig::default();
    assert_eq!(cfg.max_ranked_items, 5);
    assert!(cfg.exclusion_ids.iter().any(|s| s == "separator"));
    let (errors, warnings) = validate_config(&cfg);
    assert!(errors.is_empty());
    assert!(warnings.is_empty());

    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("quickmenu.toml");
    fs::write(&p, "max_ranked_items = 8\nexclusion_ids = ['separator']\n").unwrap();
    let loaded = load_config_file(&p).unwrap();
    assert_eq!(loaded.max_ranked_items, 8);
    assert_eq!(loaded.exclusion_ids, vec!["separator".to_string()]);
    // Unset fields keep their defaults.
    assert_eq!(loaded.special_group_markers.len(), 2);
}

#[test]
fn config_validation_flags_out_of_range_shortlist_size() {
    let cfg = QuickMenuConfig {
        max_ranked_items: 3,
        ..QuickMenuConfig::default()
    };
    let (errors, _) = validate_config(&cfg);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("max_ranked_items=3"));
    assert_eq!(cfg.clamped_max_ranked_items(), 5);
}
