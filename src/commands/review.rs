use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::category::CategoryRegistry;
use crate::cli::Cli;
use crate::config::{Config, ConfigLoader, FileConfigLoader};
use crate::error::{CodebuddyError, Result};
use crate::git::{CloneOutcome, clone_repository};
use crate::logging::verbosity_level;
use crate::output::ReviewProgress;
use crate::pipeline::{ReviewPipeline, RunSummary};
use crate::report::ReportAccumulator;
use crate::review::{ChatReviewer, Reviewer};
use crate::scanner::{FileScanner, PathFilter, ProjectScanner};
use crate::{EXIT_REVIEW_ERRORS, EXIT_RUNTIME_ERROR, EXIT_SUCCESS};

/// Create `path` if needed and return its canonical form.
///
/// # Errors
/// Returns `InvalidArgument` if `path` exists but is not a directory.
pub fn resolve_repository_dir(path: &Path) -> Result<PathBuf> {
    if path.exists() && !path.is_dir() {
        return Err(CodebuddyError::InvalidArgument(format!(
            "Repository path is not a directory: {}",
            path.display()
        )));
    }
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| CodebuddyError::from_io(path, e))?;
        tracing::debug!(path = %path.display(), "Created repository directory");
    }
    dunce::canonicalize(path).map_err(|e| CodebuddyError::from_io(path, e))
}

/// Load configuration for `repository_root`, honouring `--config` and `--no-config`.
///
/// # Errors
/// Returns an error if the selected config file cannot be read or is invalid.
pub fn load_config(cli: &Cli, repository_root: &Path) -> Result<Config> {
    load_config_with(&FileConfigLoader::new(), cli, repository_root)
}

pub(crate) fn load_config_with<L: ConfigLoader>(
    loader: &L,
    cli: &Cli,
    repository_root: &Path,
) -> Result<Config> {
    if cli.no_config {
        return Ok(Config::default());
    }
    let result = match &cli.config {
        Some(path) => loader.load_from_path(path)?,
        None => loader.load(repository_root)?,
    };
    Ok(result.config)
}

/// Apply command-line overrides on top of the loaded configuration.
pub fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(url) = &cli.api_url {
        config.api.url.clone_from(url);
    }
    if let Some(level) = verbosity_level(cli.verbose, cli.quiet) {
        config.logging.level = level.to_string();
    }
    if let Some(path) = &cli.log_file {
        config.logging.file = Some(path.clone());
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format.into();
    }
}

/// Run a review and map the outcome to an exit code.
#[must_use]
pub fn run_review(cli: &Cli, config: &Config, repository_root: &Path) -> i32 {
    match run_review_impl(cli, config, repository_root) {
        Ok(summary) if summary.is_clean() => EXIT_SUCCESS,
        Ok(_) => EXIT_REVIEW_ERRORS,
        Err(e) => {
            tracing::error!(error = %e, error_type = e.error_type(), "An error occurred");
            EXIT_RUNTIME_ERROR
        }
    }
}

/// Clones first when requested, so a cloned repository's own configuration
/// applies to the same run.
///
/// # Errors
/// Returns an error for failures that stop the whole run: invalid API
/// settings, clone failure, unusable reports directory or repository root.
pub fn run_review_impl(cli: &Cli, config: &Config, repository_root: &Path) -> Result<RunSummary> {
    let config = prepare_repository(cli, config, repository_root)?;
    let reviewer = ChatReviewer::from_config(&config.api, &config.prompts)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_review_with(cli, &config, repository_root, reviewer, &mut out)
}

/// Clone into `repository_root` when `--clone` was given.
fn prepare_repository(cli: &Cli, config: &Config, repository_root: &Path) -> Result<Config> {
    let Some(url) = &cli.repository_url else {
        return Ok(config.clone());
    };
    let outcome = clone_repository(url, repository_root)?;
    config_after_clone(&FileConfigLoader::new(), cli, config, repository_root, outcome)
}

/// Configuration to review a repository with after a clone attempt.
///
/// A fresh clone may bring its own `.codebuddy.toml`, so discovery runs again
/// unless `--config` or `--no-config` fixed the source. Logging keeps the
/// settings it was started with.
pub(crate) fn config_after_clone<L: ConfigLoader>(
    loader: &L,
    cli: &Cli,
    config: &Config,
    repository_root: &Path,
    outcome: CloneOutcome,
) -> Result<Config> {
    if outcome == CloneOutcome::Skipped || cli.no_config || cli.config.is_some() {
        return Ok(config.clone());
    }
    let mut reloaded = load_config_with(loader, cli, repository_root)?;
    apply_cli_overrides(&mut reloaded, cli);
    tracing::debug!("Reloaded configuration from cloned repository");
    Ok(reloaded)
}

pub(crate) fn run_review_with<R: Reviewer>(
    cli: &Cli,
    config: &Config,
    repository_root: &Path,
    reviewer: R,
    out: &mut dyn Write,
) -> Result<RunSummary> {
    tracing::info!(path = %repository_root.display(), "Repository directory");

    let reports_dir = cli
        .reports_dir
        .as_deref()
        .map(resolve_reports_dir)
        .transpose()?;
    let mut report = ReportAccumulator::with_dir_name(
        repository_root,
        reports_dir.as_deref(),
        &config.report.dir_name,
    )?;
    if report.reports_dir() == repository_root {
        return Err(CodebuddyError::InvalidArgument(format!(
            "Reports directory must not be the repository root: {}",
            repository_root.display()
        )));
    }
    tracing::info!(path = %report.report_file_path().display(), "Report file");

    let mut filter = PathFilter::from_config(repository_root, &config.scanner)?;
    if let Some(prefix) = report_exclusion(repository_root, report.reports_dir()) {
        filter.exclusions_mut().add_dir(prefix);
    }
    let registry = CategoryRegistry::from_config(&config.categories);
    let scanner = ProjectScanner::new(filter, registry.clone());

    tracing::info!(
        repository = %repository_name(repository_root),
        "Running analysis"
    );
    let structure = scanner.scan(repository_root)?;

    let total = u64::try_from(structure.total_files()).unwrap_or(u64::MAX);
    let progress = ReviewProgress::new(total, cli.quiet || cli.print_reports);
    let pipeline = ReviewPipeline::new(reviewer, registry).with_progress(progress);

    let printer = if cli.print_reports { Some(out) } else { None };
    let summary = pipeline.run(&structure, &mut report, printer);

    if summary.is_clean() {
        tracing::info!(reviewed = summary.reviewed, "Analysis successfully completed");
    } else {
        tracing::warn!(
            reviewed = summary.reviewed,
            errors = summary.errors,
            "Analysis complete with {} error(s)",
            summary.errors
        );
    }

    Ok(summary)
}

fn resolve_reports_dir(path: &Path) -> Result<PathBuf> {
    fs::create_dir_all(path).map_err(|e| CodebuddyError::from_io(path, e))?;
    dunce::canonicalize(path).map_err(|e| CodebuddyError::from_io(path, e))
}

/// Excluded-dir prefix for a reports directory located inside the repository.
fn report_exclusion(repository_root: &Path, reports_dir: &Path) -> Option<String> {
    let relative = reports_dir.strip_prefix(repository_root).ok()?;
    if relative.as_os_str().is_empty() {
        return None;
    }
    let posix = relative.to_string_lossy().replace('\\', "/");
    Some(format!("{posix}/"))
}

fn repository_name(repository_root: &Path) -> String {
    repository_root
        .file_name()
        .map_or_else(|| repository_root.display().to_string(), |n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
#[path = "review_tests.rs"]
mod tests;
