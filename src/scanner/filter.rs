use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use super::gitignore::IgnoreSpec;
use crate::config::ScannerConfig;
use crate::error::{CodebuddyError, Result};

/// Static exclusions evaluated before categorisation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionList {
    /// Basenames that are always skipped (`LICENSE`, lock files, ...).
    pub files: Vec<String>,
    /// Forward-slash prefixes of relative paths that are always skipped.
    pub dirs: Vec<String>,
}

impl ExclusionList {
    #[must_use]
    pub const fn new(files: Vec<String>, dirs: Vec<String>) -> Self {
        Self { files, dirs }
    }

    /// Add a directory prefix unless already present.
    pub fn add_dir(&mut self, prefix: impl Into<String>) {
        let prefix = prefix.into();
        if !self.dirs.contains(&prefix) {
            self.dirs.push(prefix);
        }
    }
}

/// Why a path was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Matched an ignore-file pattern or a configured exclude glob.
    Ignored,
    /// Basename is in the excluded files list.
    ExcludedFile,
    /// Relative path starts with an excluded directory prefix.
    ExcludedDir,
}

/// Decides whether a repository-relative path is skipped before categorisation.
#[derive(Debug, Clone)]
pub struct PathFilter {
    ignore: IgnoreSpec,
    exclude_patterns: GlobSet,
    exclusions: ExclusionList,
}

impl PathFilter {
    #[must_use]
    pub fn new(ignore: IgnoreSpec, exclusions: ExclusionList) -> Self {
        Self {
            ignore,
            exclude_patterns: GlobSet::empty(),
            exclusions,
        }
    }

    /// Add glob patterns that are treated like ignore-file entries.
    ///
    /// # Errors
    /// Returns an error if any pattern is invalid.
    pub fn with_exclude_patterns(mut self, patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| CodebuddyError::InvalidPattern {
                pattern: pattern.clone(),
                source: e,
            })?;
            builder.add(glob);
        }
        self.exclude_patterns = builder
            .build()
            .map_err(|e| CodebuddyError::InvalidPattern {
                pattern: "combined patterns".to_string(),
                source: e,
            })?;
        Ok(self)
    }

    /// Build the filter for `root` from the scanner configuration.
    ///
    /// # Errors
    /// Returns an error if the ignore file cannot be read or a pattern is invalid.
    pub fn from_config(root: &Path, config: &ScannerConfig) -> Result<Self> {
        let ignore = if config.gitignore {
            IgnoreSpec::from_repository(root)?
        } else {
            IgnoreSpec::empty()
        };
        let exclusions =
            ExclusionList::new(config.exclude_files.clone(), config.exclude_dirs.clone());
        Self::new(ignore, exclusions).with_exclude_patterns(&config.exclude)
    }

    #[must_use]
    pub const fn exclusions(&self) -> &ExclusionList {
        &self.exclusions
    }

    pub const fn exclusions_mut(&mut self) -> &mut ExclusionList {
        &mut self.exclusions
    }

    /// First matching skip rule for `relative_path`, in order: ignore
    /// patterns, excluded basenames, excluded directory prefixes.
    #[must_use]
    pub fn skip_reason(&self, relative_path: &Path, is_dir: bool) -> Option<SkipReason> {
        let posix = relative_path.to_string_lossy().replace('\\', "/");

        if self.ignore.is_match(relative_path, is_dir)
            || self.exclude_patterns.is_match(posix.as_str())
        {
            return Some(SkipReason::Ignored);
        }

        let basename = relative_path
            .file_name()
            .map(|name| name.to_string_lossy());
        if let Some(name) = basename
            && self.exclusions.files.iter().any(|f| *f == name)
        {
            return Some(SkipReason::ExcludedFile);
        }

        if self
            .exclusions
            .dirs
            .iter()
            .any(|dir| posix.starts_with(dir.as_str()))
        {
            return Some(SkipReason::ExcludedDir);
        }

        None
    }

    #[must_use]
    pub fn should_skip(&self, relative_path: &Path, is_dir: bool) -> bool {
        self.skip_reason(relative_path, is_dir).is_some()
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
