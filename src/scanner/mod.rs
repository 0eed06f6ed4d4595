mod filter;
mod gitignore;
mod structure;

pub use filter::{ExclusionList, PathFilter, SkipReason};
pub use gitignore::{GITIGNORE_FILE, IgnoreSpec};
pub use structure::ProjectStructure;

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::category::CategoryRegistry;
use crate::error::{CodebuddyError, Result};

/// Trait for scanning a repository into categorised files.
pub trait FileScanner {
    /// Walk `root` and group every reviewable file by category.
    ///
    /// # Errors
    /// Returns an error if `root` does not exist or is not a directory.
    fn scan(&self, root: &Path) -> Result<ProjectStructure>;
}

/// Walks a repository, applies a [`PathFilter`] to every entry and classifies
/// surviving regular files by extension.
///
/// Traversal order is whatever the filesystem yields; no sorting is applied.
pub struct ProjectScanner {
    filter: PathFilter,
    registry: CategoryRegistry,
}

impl ProjectScanner {
    #[must_use]
    pub const fn new(filter: PathFilter, registry: CategoryRegistry) -> Self {
        Self { filter, registry }
    }

    #[must_use]
    pub const fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    fn scan_impl(&self, root: &Path) -> ProjectStructure {
        let mut structure =
            ProjectStructure::new(root, self.registry.all().iter().map(|c| c.name.clone()));

        for entry in WalkDir::new(root).min_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable directory entry");
                    continue;
                }
            };

            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            let file_type = entry.file_type();

            if let Some(reason) = self.filter.skip_reason(relative, file_type.is_dir()) {
                tracing::trace!(path = %relative.display(), ?reason, "Skipped path");
                continue;
            }

            if !file_type.is_file() {
                continue;
            }

            match self.registry.classify(relative) {
                Some(category) => {
                    tracing::debug!(
                        path = %relative.display(),
                        category = %category.name,
                        "Categorized file"
                    );
                    structure.push(&category.name, entry.into_path());
                }
                None => {
                    tracing::trace!(path = %relative.display(), "No category for file");
                }
            }
        }

        structure
    }
}

impl FileScanner for ProjectScanner {
    fn scan(&self, root: &Path) -> Result<ProjectStructure> {
        let metadata = fs::metadata(root).map_err(|e| CodebuddyError::from_io(root, e))?;
        if !metadata.is_dir() {
            return Err(CodebuddyError::InvalidArgument(format!(
                "Repository path is not a directory: {}",
                root.display()
            )));
        }

        let root = dunce::canonicalize(root).map_err(|e| CodebuddyError::from_io(root, e))?;
        Ok(self.scan_impl(&root))
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
