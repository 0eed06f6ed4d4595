use std::path::{Path, PathBuf};

use indexmap::IndexMap;

/// Category name to the files placed in it, in scan order.
///
/// Every declared category has a key, even when no file matched it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStructure {
    root: PathBuf,
    files: IndexMap<String, Vec<PathBuf>>,
}

impl ProjectStructure {
    #[must_use]
    pub fn new<I, S>(root: impl Into<PathBuf>, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root: root.into(),
            files: categories
                .into_iter()
                .map(|name| (name.into(), Vec::new()))
                .collect(),
        }
    }

    /// Append `path` to `category`, creating the key if needed.
    pub fn push(&mut self, category: &str, path: PathBuf) {
        self.files
            .entry(category.to_string())
            .or_default()
            .push(path);
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn get(&self, category: &str) -> Option<&[PathBuf]> {
        self.files.get(category).map(Vec::as_slice)
    }

    /// Category names in declaration order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.files
            .iter()
            .map(|(name, files)| (name.as_str(), files.as_slice()))
    }

    #[must_use]
    pub fn total_files(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_files() == 0
    }

    /// Category holding `path`, if any.
    #[must_use]
    pub fn category_of(&self, path: &Path) -> Option<&str> {
        self.files
            .iter()
            .find(|(_, files)| files.iter().any(|f| f == path))
            .map(|(name, _)| name.as_str())
    }
}
