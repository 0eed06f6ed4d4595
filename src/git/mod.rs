//! Fetching the repository under review.

mod clone;

pub use clone::{CloneOutcome, clone_repository, validate_git_url};

#[cfg(test)]
#[path = "clone_tests.rs"]
mod tests;
