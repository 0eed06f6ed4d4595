use std::fs;
use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::error::{CodebuddyError, Result};

pub const GITIGNORE_FILE: &str = ".gitignore";

/// Compiled patterns from the repository root `.gitignore`.
///
/// Patterns follow the gitignore dialect (`*`, `**`, trailing `/` for
/// directories, `!` negation) and are matched against paths relative to the
/// repository root. A path is also ignored when any of its parent
/// directories is ignored.
#[derive(Debug, Clone)]
pub struct IgnoreSpec {
    matcher: Gitignore,
    patterns: Vec<String>,
}

impl IgnoreSpec {
    /// A spec that ignores nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            matcher: Gitignore::empty(),
            patterns: Vec::new(),
        }
    }

    /// Compile patterns from ignore-file lines. Blank lines and `#` comments are dropped.
    ///
    /// # Errors
    /// Returns an error if a pattern is not a valid glob.
    pub fn from_lines<I, S>(root: &Path, lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GitignoreBuilder::new(root);
        let mut patterns = Vec::new();

        for line in lines {
            let line = line.as_ref().trim_start();
            // Trailing whitespace is insignificant unless escaped as `\ `.
            let pattern = if line.ends_with("\\ ") {
                line
            } else {
                line.trim_end()
            };
            if pattern.is_empty() || pattern.starts_with('#') {
                continue;
            }
            builder
                .add_line(None, pattern)
                .map_err(|source| CodebuddyError::InvalidIgnorePattern {
                    pattern: pattern.to_string(),
                    source,
                })?;
            patterns.push(pattern.to_string());
        }

        let matcher = builder
            .build()
            .map_err(|source| CodebuddyError::InvalidIgnorePattern {
                pattern: "combined patterns".to_string(),
                source,
            })?;

        Ok(Self { matcher, patterns })
    }

    /// Load `<root>/.gitignore`. An absent file yields an empty spec.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read, or holds an invalid pattern.
    pub fn from_repository(root: &Path) -> Result<Self> {
        let path = root.join(GITIGNORE_FILE);
        if !path.is_file() {
            return Ok(Self::empty());
        }

        let content =
            fs::read_to_string(&path).map_err(|source| CodebuddyError::from_io(&path, source))?;
        let spec = Self::from_lines(root, content.lines())?;
        tracing::debug!(
            path = %path.display(),
            patterns = spec.patterns.len(),
            "Loaded ignore file"
        );
        Ok(spec)
    }

    /// Whether `relative_path` (or one of its parents) is ignored.
    #[must_use]
    pub fn is_match(&self, relative_path: &Path, is_dir: bool) -> bool {
        if self.patterns.is_empty() || relative_path.has_root() {
            return false;
        }
        self.matcher
            .matched_path_or_any_parents(relative_path, is_dir)
            .is_ignore()
    }

    /// The patterns that were compiled, in file order.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

#[cfg(test)]
#[path = "gitignore_tests.rs"]
mod tests;
