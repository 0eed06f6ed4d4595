//! Configuration semantic validation.
//!
//! Runs after parsing: range checks, prompt templates, category uniqueness,
//! glob pattern syntax and the reports directory name.

use std::collections::HashSet;
use std::path::{Component, Path};

use crate::config::{Config, DATA_PLACEHOLDER};
use crate::{CodebuddyError, Result};

/// Validates semantic correctness of a configuration.
///
/// # Errors
/// Returns an error if the API settings are out of range, a category is
/// malformed, a prompt lacks the `{data}` placeholder, an exclude glob is
/// invalid or the reports directory name does not point below the repository.
pub fn validate_config_semantics(config: &Config) -> Result<()> {
    validate_api_section(config)?;
    validate_categories(config)?;
    validate_glob_patterns(config)?;
    validate_report_section(config)?;
    Ok(())
}

fn validate_api_section(config: &Config) -> Result<()> {
    if !(0.0..=2.0).contains(&config.api.temperature) {
        return Err(CodebuddyError::Config(format!(
            "api.temperature must be between 0.0 and 2.0, got {}",
            config.api.temperature
        )));
    }

    if config.api.max_tokens == 0 {
        return Err(CodebuddyError::Config(
            "api.max_tokens must be greater than 0".to_string(),
        ));
    }

    if config.api.endpoint.trim().is_empty() {
        return Err(CodebuddyError::Config(
            "api.endpoint must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_categories(config: &Config) -> Result<()> {
    if config.categories.is_empty() {
        return Err(CodebuddyError::Config(
            "at least one [[categories]] entry is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for (i, category) in config.categories.iter().enumerate() {
        if category.name.trim().is_empty() {
            return Err(CodebuddyError::Config(format!(
                "categories[{i}].name must not be empty"
            )));
        }

        if !seen.insert(category.name.as_str()) {
            return Err(CodebuddyError::Config(format!(
                "duplicate category name '{}'",
                category.name
            )));
        }

        if !category.prompt.contains(DATA_PLACEHOLDER) {
            return Err(CodebuddyError::Config(format!(
                "categories[{i}].prompt ('{}') must contain the {DATA_PLACEHOLDER} placeholder",
                category.name
            )));
        }
    }
    Ok(())
}

fn validate_glob_patterns(config: &Config) -> Result<()> {
    for pattern in &config.scanner.exclude {
        globset::Glob::new(pattern).map_err(|e| CodebuddyError::InvalidPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
    }
    Ok(())
}

/// `report.dir_name` must name a directory below the repository root.
fn validate_report_section(config: &Config) -> Result<()> {
    let dir_name = config.report.dir_name.trim();
    let below_root = !dir_name.is_empty()
        && Path::new(dir_name)
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
    if !below_root {
        return Err(CodebuddyError::Config(format!(
            "report.dir_name must be a relative directory inside the repository, got '{}'",
            config.report.dir_name
        )));
    }
    Ok(())
}
