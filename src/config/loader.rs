use std::path::{Path, PathBuf};

use crate::category::normalize_extension;
use crate::error::{CodebuddyError, Result};

use super::Config;
use super::filesystem::{FileSystem, RealFileSystem};
use super::validation::validate_config_semantics;

/// Result of loading a configuration, containing both the config and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// The file the configuration was read from, `None` for built-in defaults.
    pub source: Option<PathBuf>,
}

/// Trait for loading configuration from various sources.
pub trait ConfigLoader {
    /// Load configuration for a repository, searching the default locations.
    ///
    /// # Errors
    /// Returns an error if a discovered config file cannot be read, parsed or validated.
    fn load(&self, repository_root: &Path) -> Result<LoadResult>;

    /// Load configuration from a specific path.
    ///
    /// # Errors
    /// Returns an error if the file does not exist or cannot be read, parsed or validated.
    fn load_from_path(&self, path: &Path) -> Result<LoadResult>;
}

pub const LOCAL_CONFIG_NAME: &str = ".codebuddy.toml";
const USER_CONFIG_NAME: &str = "config.toml";

/// Loads configuration from the filesystem.
///
/// Search order:
/// 1. `.codebuddy.toml` in the repository root
/// 2. Platform-specific user config directory (`codebuddy/config.toml`)
/// 3. Returns `Config::default()` if no config found
#[derive(Debug)]
pub struct FileConfigLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl Default for FileConfigLoader<RealFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl FileConfigLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> FileConfigLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    fn user_config_path(&self) -> Option<PathBuf> {
        self.fs.config_dir().map(|dir| dir.join(USER_CONFIG_NAME))
    }

    fn read_config(&self, path: &Path) -> Result<LoadResult> {
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|source| CodebuddyError::from_io(path, source))?;
        let config = parse_config(&content)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(LoadResult {
            config,
            source: Some(path.to_path_buf()),
        })
    }
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load(&self, repository_root: &Path) -> Result<LoadResult> {
        let local = repository_root.join(LOCAL_CONFIG_NAME);
        if self.fs.exists(&local) {
            return self.read_config(&local);
        }

        if let Some(user) = self.user_config_path()
            && self.fs.exists(&user)
        {
            return self.read_config(&user);
        }

        Ok(LoadResult {
            config: Config::default(),
            source: None,
        })
    }

    fn load_from_path(&self, path: &Path) -> Result<LoadResult> {
        if !self.fs.exists(path) {
            return Err(CodebuddyError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        self.read_config(path)
    }
}

/// Parse, normalise and validate a TOML configuration document.
///
/// # Errors
/// Returns an error if the TOML is malformed or the configuration is invalid.
pub fn parse_config(content: &str) -> Result<Config> {
    let mut config: Config = toml::from_str(content)?;
    normalize_extensions(&mut config);
    validate_config_semantics(&config)?;
    Ok(config)
}

/// Lowercase every category extension and ensure it carries a leading dot.
fn normalize_extensions(config: &mut Config) {
    for category in &mut config.categories {
        for ext in &mut category.extensions {
            *ext = normalize_extension(ext);
        }
    }
}

#[cfg(test)]
#[path = "loader_tests/mod.rs"]
mod tests;
