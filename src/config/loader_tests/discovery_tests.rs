use std::path::{Path, PathBuf};

use super::mock_fs::MockFileSystem;
use crate::config::{Config, ConfigLoader, FileConfigLoader};
use crate::error::CodebuddyError;

#[test]
fn returns_defaults_when_no_config_exists() {
    let loader = FileConfigLoader::with_fs(MockFileSystem::new());

    let result = loader.load(Path::new("/repo")).unwrap();

    assert_eq!(result.config, Config::default());
    assert!(result.source.is_none());
}

#[test]
fn prefers_repository_config_over_user_config() {
    let fs = MockFileSystem::new()
        .with_file("/repo/.codebuddy.toml", "[api]\nurl = \"http://repo:1\"\n")
        .with_file(
            "/home/user/.config/codebuddy/config.toml",
            "[api]\nurl = \"http://user:2\"\n",
        );
    let loader = FileConfigLoader::with_fs(fs);

    let result = loader.load(Path::new("/repo")).unwrap();

    assert_eq!(result.config.api.url, "http://repo:1");
    assert_eq!(result.source, Some(PathBuf::from("/repo/.codebuddy.toml")));
}

#[test]
fn falls_back_to_user_config() {
    let fs = MockFileSystem::new().with_file(
        "/home/user/.config/codebuddy/config.toml",
        "[api]\nmax_tokens = 900\n",
    );
    let loader = FileConfigLoader::with_fs(fs);

    let result = loader.load(Path::new("/repo")).unwrap();

    assert_eq!(result.config.api.max_tokens, 900);
    assert_eq!(
        result.source,
        Some(PathBuf::from("/home/user/.config/codebuddy/config.toml"))
    );
}

#[test]
fn missing_user_config_dir_uses_defaults() {
    let fs = MockFileSystem::new().with_config_dir(None);
    let loader = FileConfigLoader::with_fs(fs);

    let result = loader.load(Path::new("/repo")).unwrap();

    assert!(result.source.is_none());
}

#[test]
fn load_from_path_reads_explicit_file() {
    let fs = MockFileSystem::new().with_file("/etc/review.toml", "[report]\ndir_name = \"out\"\n");
    let loader = FileConfigLoader::with_fs(fs);

    let result = loader.load_from_path(Path::new("/etc/review.toml")).unwrap();

    assert_eq!(result.config.report.dir_name, "out");
}

#[test]
fn load_from_path_missing_file_is_config_error() {
    let loader = FileConfigLoader::with_fs(MockFileSystem::new());

    let err = loader
        .load_from_path(Path::new("/nowhere/review.toml"))
        .unwrap_err();

    assert!(matches!(err, CodebuddyError::Config(_)));
    assert!(err.to_string().contains("/nowhere/review.toml"));
}

#[test]
fn invalid_repository_config_is_reported() {
    let fs = MockFileSystem::new().with_file("/repo/.codebuddy.toml", "[api\nurl = 3");
    let loader = FileConfigLoader::with_fs(fs);

    let err = loader.load(Path::new("/repo")).unwrap_err();

    assert!(matches!(err, CodebuddyError::TomlParse(_)));
}
