use super::*;

#[test]
fn config_default_values() {
    let config = Config::default();

    assert_eq!(config.api.url, "http://localhost:1234");
    assert_eq!(config.report.dir_name, DEFAULT_REPORT_DIR_NAME);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Full);
    assert!(config.scanner.gitignore);
}

#[test]
fn default_categories_are_code_then_docs() {
    let config = Config::default();

    assert_eq!(config.categories[0].name, "code");
    assert!(config.categories[0].extensions.contains(&".py".to_string()));
    assert!(config.categories[0].extensions.contains(&".rs".to_string()));
    assert_eq!(config.categories[1].name, "docs");
    assert!(config.categories[1].extensions.contains(&".md".to_string()));
}

#[test]
fn default_categories_extension_sets_are_disjoint() {
    let config = Config::default();
    let code = &config.categories[0].extensions;
    let docs = &config.categories[1].extensions;

    assert!(code.iter().all(|ext| !docs.contains(ext)));
}

#[test]
fn default_prompts_contain_placeholder() {
    let config = Config::default();

    for category in &config.categories {
        assert!(category.prompt.contains(DATA_PLACEHOLDER), "{}", category.name);
    }
}

#[test]
fn default_exclusions_cover_report_dir_and_git() {
    let scanner = ScannerConfig::default();

    assert!(scanner.exclude_files.contains(&"LICENSE".to_string()));
    assert!(scanner.exclude_files.contains(&"__init__.py".to_string()));
    assert!(scanner.exclude_dirs.contains(&"reports/".to_string()));
    assert!(scanner.exclude_dirs.contains(&".git/".to_string()));
}

#[test]
fn default_config_passes_validation() {
    validate_config_semantics(&Config::default()).unwrap();
}

#[test]
fn config_round_trips_through_toml() {
    let config = Config::default();
    let text = toml::to_string(&config).unwrap();
    let parsed = parse_config(&text).unwrap();

    assert_eq!(parsed, config);
}
