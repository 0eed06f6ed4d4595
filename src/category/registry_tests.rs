use std::path::Path;

use super::*;
use crate::config::CategoryConfig;

#[test]
fn category_construction_lowercases_extensions() {
    let category = Category::new("code", vec![".RS", ".py"], "{data}");
    assert_eq!(category.name, "code");
    assert_eq!(category.extensions, vec![".rs", ".py"]);
}

#[test]
fn registry_register_and_lookup() {
    let mut registry = CategoryRegistry::new();
    registry.register(Category::new("shell", vec![".sh", ".bash"], "{data}"));

    assert_eq!(registry.get_by_extension(".sh").unwrap().name, "shell");
    assert_eq!(registry.get_by_extension(".bash").unwrap().name, "shell");
    assert!(registry.get_by_extension(".zsh").is_none());
}

#[test]
fn first_registered_category_wins_on_overlap() {
    let mut registry = CategoryRegistry::new();
    registry.register(Category::new("code", vec![".txt", ".py"], "{data}"));
    registry.register(Category::new("docs", vec![".txt", ".md"], "{data}"));

    assert_eq!(registry.get_by_extension(".txt").unwrap().name, "code");
    assert_eq!(registry.get_by_extension(".md").unwrap().name, "docs");
}

#[test]
fn all_preserves_declaration_order() {
    let mut registry = CategoryRegistry::new();
    registry.register(Category::new("zeta", vec![".z"], "{data}"));
    registry.register(Category::new("alpha", vec![".a"], "{data}"));

    let names: Vec<_> = registry.all().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["zeta", "alpha"]);
}

#[test]
fn default_registry_has_code_and_docs() {
    let registry = CategoryRegistry::default();

    assert_eq!(registry.classify(Path::new("src/main.py")).unwrap().name, "code");
    assert_eq!(registry.classify(Path::new("README.md")).unwrap().name, "docs");
    assert!(registry.classify(Path::new("Makefile")).is_none());
    assert!(registry.get("code").is_some());
    assert!(registry.get("tests").is_none());
}

#[test]
fn classify_is_case_insensitive() {
    let registry = CategoryRegistry::default();

    assert_eq!(registry.classify(Path::new("MAIN.PY")).unwrap().name, "code");
    assert_eq!(registry.classify(Path::new("Notes.TXT")).unwrap().name, "docs");
}

#[test]
fn extension_of_includes_leading_dot() {
    assert_eq!(extension_of(Path::new("a/b/main.RS")), ".rs");
    assert_eq!(extension_of(Path::new("archive.tar.gz")), ".gz");
}

#[test]
fn extension_of_is_empty_without_extension() {
    assert_eq!(extension_of(Path::new("Makefile")), "");
    assert_eq!(extension_of(Path::new(".gitignore")), "");
    assert_eq!(extension_of(Path::new("trailing.")), "");
}

#[test]
fn category_from_config_normalizes_extensions() {
    let config = CategoryConfig {
        name: "code".to_string(),
        extensions: vec!["PY".to_string(), " .Rs ".to_string()],
        prompt: "{data}".to_string(),
    };

    let category = Category::from(&config);

    assert_eq!(category.extensions, vec![".py", ".rs"]);
    let mut registry = CategoryRegistry::new();
    registry.register(category);
    assert_eq!(
        registry.classify(Path::new("src/main.py")).map(|c| c.name.as_str()),
        Some("code")
    );
}

#[test]
fn normalize_extension_adds_dot_and_lowercases() {
    assert_eq!(normalize_extension("MD"), ".md");
    assert_eq!(normalize_extension(".Txt"), ".txt");
}
