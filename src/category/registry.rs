use std::collections::HashMap;
use std::path::Path;

use crate::config::CategoryConfig;

/// A review bucket: files whose extension is in `extensions` are reviewed with `prompt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    /// Lowercase extensions including the leading dot.
    pub extensions: Vec<String>,
    /// Prompt template containing `{data}`.
    pub prompt: String,
}

impl Category {
    #[must_use]
    pub fn new(name: &str, extensions: Vec<&str>, prompt: &str) -> Self {
        Self {
            name: name.to_string(),
            extensions: extensions.into_iter().map(normalize_extension).collect(),
            prompt: prompt.to_string(),
        }
    }

    #[must_use]
    pub fn matches_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }
}

impl From<&CategoryConfig> for Category {
    fn from(config: &CategoryConfig) -> Self {
        Self {
            name: config.name.clone(),
            extensions: config
                .extensions
                .iter()
                .map(|ext| normalize_extension(ext))
                .collect(),
            prompt: config.prompt.clone(),
        }
    }
}

/// Ordered set of categories.
///
/// Lookup is first-match in declaration order: when two categories share an
/// extension, the one registered first owns it.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
    extension_map: HashMap<String, usize>,
}

impl CategoryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
            extension_map: HashMap::new(),
        }
    }

    pub fn register(&mut self, category: Category) {
        let idx = self.categories.len();
        for ext in &category.extensions {
            self.extension_map.entry(ext.clone()).or_insert(idx);
        }
        self.categories.push(category);
    }

    #[must_use]
    pub fn from_config(categories: &[CategoryConfig]) -> Self {
        let mut registry = Self::new();
        for config in categories {
            registry.register(Category::from(config));
        }
        registry
    }

    /// Category owning `ext` (lowercase, leading dot).
    #[must_use]
    pub fn get_by_extension(&self, ext: &str) -> Option<&Category> {
        self.extension_map
            .get(ext)
            .map(|&idx| &self.categories[idx])
    }

    /// Category for a file path, by its extension.
    #[must_use]
    pub fn classify(&self, path: &Path) -> Option<&Category> {
        let ext = extension_of(path);
        if ext.is_empty() {
            return None;
        }
        self.get_by_extension(&ext)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// All categories in declaration order.
    #[must_use]
    pub fn all(&self) -> &[Category] {
        &self.categories
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::from_config(&crate::config::Config::default().categories)
    }
}

/// Trimmed, lowercased `ext` with a leading dot (`"RS"` becomes `".rs"`).
#[must_use]
pub fn normalize_extension(ext: &str) -> String {
    let lower = ext.trim().to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    }
}

/// Lowercased extension of `path` including the leading dot, or an empty
/// string when the file has none. Dotfiles such as `.gitignore` have none.
#[must_use]
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}
