use std::path::Path;
use std::sync::atomic::AtomicBool;

use gix::bstr::ByteSlice;
use gix::url::Scheme;

use crate::error::{CodebuddyError, Result};

/// What [`clone_repository`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneOutcome {
    Cloned,
    /// Destination already holds a `.git` directory.
    Skipped,
}

/// Check that `url` names a remote repository.
///
/// Accepts `http(s)://`, `ssh://`, `git://`, scp-like `user@host:path` and
/// explicit `file://` URLs. Bare filesystem paths are rejected.
///
/// # Errors
/// Returns `InvalidArgument` if the URL cannot be parsed or is a bare path.
pub fn validate_git_url(url: &str) -> Result<gix::Url> {
    let invalid = |reason: String| {
        CodebuddyError::InvalidArgument(format!("'{url}' is not a valid git URL: {reason}"))
    };

    if url.trim().is_empty() {
        return Err(invalid("empty".to_string()));
    }

    let parsed = gix::url::parse(url.as_bytes().as_bstr()).map_err(|e| invalid(e.to_string()))?;
    if parsed.scheme == Scheme::File && !url.starts_with("file://") {
        return Err(invalid("local paths are not supported".to_string()));
    }

    Ok(parsed)
}

/// Clone `url` into `destination` and check out the default branch.
///
/// Nothing is done when `destination/.git` already exists.
///
/// # Errors
/// Returns `InvalidArgument` for a malformed URL and `Git` when fetching or
/// checking out fails.
pub fn clone_repository(url: &str, destination: &Path) -> Result<CloneOutcome> {
    if destination.join(".git").exists() {
        tracing::warn!(
            path = %destination.display(),
            "Repository cloning skipped, destination already contains a repository"
        );
        return Ok(CloneOutcome::Skipped);
    }

    validate_git_url(url)?;
    tracing::info!(url, path = %destination.display(), "Cloning repository");

    let interrupt = AtomicBool::new(false);
    let mut prepare = gix::prepare_clone(url, destination)
        .map_err(|e| CodebuddyError::Git(format!("Failed to prepare clone of {url}: {e}")))?;
    let (mut checkout, _) = prepare
        .fetch_then_checkout(gix::progress::Discard, &interrupt)
        .map_err(|e| CodebuddyError::Git(format!("Failed to fetch {url}: {e}")))?;
    let (repo, _) = checkout
        .main_worktree(gix::progress::Discard, &interrupt)
        .map_err(|e| CodebuddyError::Git(format!("Failed to check out {url}: {e}")))?;

    tracing::debug!(git_dir = %repo.git_dir().display(), "Clone complete");
    Ok(CloneOutcome::Cloned)
}
