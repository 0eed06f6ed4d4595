mod text;

pub use text::markdown_to_text;

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::config::DEFAULT_REPORT_DIR_NAME;
use crate::error::{CodebuddyError, Result};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Destination for successful reviews.
pub trait ReportSink {
    /// Buffer one review; flush right away when `auto_save` is set.
    ///
    /// An entry whose induced flush fails is discarded, so a rejected entry
    /// never reaches the report through a later flush.
    ///
    /// # Errors
    /// Returns an error if the induced flush fails.
    fn add_entry(&mut self, file: &Path, review: &str, auto_save: bool) -> Result<bool>;

    /// Persist buffered entries. Returns `false` when nothing was buffered.
    ///
    /// # Errors
    /// Returns an error if the report file cannot be written.
    fn flush(&mut self) -> Result<bool>;
}

/// Report file name for a run started at `timestamp`.
///
/// `repository_name` is prefixed when reports of several repositories share
/// a directory.
#[must_use]
pub fn report_file_name(repository_name: Option<&str>, timestamp: &DateTime<Local>) -> String {
    let stamp = timestamp.format(TIMESTAMP_FORMAT);
    match repository_name {
        Some(name) => format!("{name}_{stamp}.md"),
        None => format!("{stamp}.md"),
    }
}

/// Buffers review entries and appends them to one Markdown file per run.
///
/// The file path is fixed at construction; the file itself is created by the
/// first flush that has something to write.
#[derive(Debug)]
pub struct ReportAccumulator {
    repository_root: PathBuf,
    reports_dir: PathBuf,
    report_file: PathBuf,
    pending: Vec<String>,
}

impl ReportAccumulator {
    /// Accumulator for `repository_root`, writing into `reports_dir` or
    /// `<repository_root>/reports` when none is given.
    ///
    /// # Errors
    /// Returns an error if the reports directory cannot be created.
    pub fn new(repository_root: &Path, reports_dir: Option<&Path>) -> Result<Self> {
        Self::with_dir_name(repository_root, reports_dir, DEFAULT_REPORT_DIR_NAME)
    }

    /// Like [`ReportAccumulator::new`] with a custom default directory name.
    ///
    /// # Errors
    /// Returns an error if the reports directory cannot be created.
    pub fn with_dir_name(
        repository_root: &Path,
        reports_dir: Option<&Path>,
        dir_name: &str,
    ) -> Result<Self> {
        let (dir, prefix) = match reports_dir {
            Some(dir) => (
                dir.to_path_buf(),
                repository_root
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned()),
            ),
            None => (repository_root.join(dir_name), None),
        };

        if dir.is_dir() {
            tracing::debug!(path = %dir.display(), "Reports directory already exists");
        } else {
            fs::create_dir_all(&dir).map_err(|e| CodebuddyError::from_io(&dir, e))?;
            tracing::debug!(path = %dir.display(), "Created reports directory");
        }

        let report_file = dir.join(report_file_name(prefix.as_deref(), &Local::now()));
        tracing::debug!(path = %report_file.display(), "Report file path set");

        Ok(Self {
            repository_root: repository_root.to_path_buf(),
            reports_dir: dir,
            report_file,
            pending: Vec::new(),
        })
    }

    #[must_use]
    pub fn report_file_path(&self) -> &Path {
        &self.report_file
    }

    #[must_use]
    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    /// Number of entries waiting for a flush.
    #[must_use]
    pub fn pending_entries(&self) -> usize {
        self.pending.len()
    }

    /// Render one entry. Paths inside the repository are shown relative to it.
    #[must_use]
    pub fn format_entry(&self, file: &Path, review: &str) -> String {
        let shown = file.strip_prefix(&self.repository_root).unwrap_or(file);
        let shown = shown.to_string_lossy().replace('\\', "/");
        format!("## File: {shown}\n{review}\n\n")
    }

    /// Remove the report file. Returns `false` if it did not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed.
    pub fn delete_report_file(&self) -> Result<bool> {
        removed(&self.report_file, fs::remove_file(&self.report_file))
    }

    /// Remove the reports directory and everything in it. Returns `false` if
    /// it did not exist.
    ///
    /// # Errors
    /// Returns an error if the directory exists but cannot be removed.
    pub fn delete_reports_dir(&self) -> Result<bool> {
        removed(&self.reports_dir, fs::remove_dir_all(&self.reports_dir))
    }
}

fn removed(path: &Path, result: io::Result<()>) -> Result<bool> {
    match result {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Removed");
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(CodebuddyError::from_io(path, e)),
    }
}

impl ReportSink for ReportAccumulator {
    fn add_entry(&mut self, file: &Path, review: &str, auto_save: bool) -> Result<bool> {
        let entry = self.format_entry(file, review);
        self.pending.push(entry);
        tracing::trace!(pending = self.pending.len(), "Report entry added");

        if auto_save && let Err(e) = self.flush() {
            self.pending.pop();
            return Err(e);
        }
        Ok(true)
    }

    fn flush(&mut self) -> Result<bool> {
        if self.pending.is_empty() {
            tracing::trace!("Nothing to flush");
            return Ok(false);
        }

        let data = self.pending.concat();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.report_file)
            .map_err(|e| CodebuddyError::from_io(&self.report_file, e))?;
        file.write_all(data.as_bytes())
            .map_err(|e| CodebuddyError::from_io(&self.report_file, e))?;

        tracing::debug!(
            path = %self.report_file.display(),
            entries = self.pending.len(),
            "Report data written"
        );
        self.pending.clear();
        Ok(true)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
