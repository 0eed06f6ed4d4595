mod registry;

pub use registry::{Category, CategoryRegistry, extension_of, normalize_extension};

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
