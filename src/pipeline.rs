use std::io::Write;
use std::path::Path;

use crate::category::{Category, CategoryRegistry};
use crate::error::{CodebuddyError, Result};
use crate::output::ReviewProgress;
use crate::reader::{FileReader, Utf8FileReader};
use crate::report::{ReportSink, markdown_to_text};
use crate::review::Reviewer;
use crate::scanner::ProjectStructure;

/// Outcome of one review run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files whose review reached the report.
    pub reviewed: usize,
    /// Files skipped because reading, reviewing or recording failed.
    pub errors: usize,
}

impl RunSummary {
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.errors == 0
    }
}

/// Reads, reviews and records every scanned file, one at a time.
///
/// A failure is contained to the file that caused it: it is logged, counted
/// and the run moves on to the next file.
pub struct ReviewPipeline<R: Reviewer, F: FileReader = Utf8FileReader> {
    reviewer: R,
    reader: F,
    registry: CategoryRegistry,
    progress: Option<ReviewProgress>,
    auto_save: bool,
}

impl<R: Reviewer> ReviewPipeline<R> {
    #[must_use]
    pub const fn new(reviewer: R, registry: CategoryRegistry) -> Self {
        Self {
            reviewer,
            reader: Utf8FileReader,
            registry,
            progress: None,
            auto_save: true,
        }
    }
}

impl<R: Reviewer, F: FileReader> ReviewPipeline<R, F> {
    #[must_use]
    pub fn with_reader<G: FileReader>(self, reader: G) -> ReviewPipeline<R, G> {
        ReviewPipeline {
            reviewer: self.reviewer,
            reader,
            registry: self.registry,
            progress: self.progress,
            auto_save: self.auto_save,
        }
    }

    #[must_use]
    pub fn with_progress(mut self, progress: ReviewProgress) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Flush the sink after every entry (default) or only once at the end.
    #[must_use]
    pub const fn with_auto_save(mut self, auto_save: bool) -> Self {
        self.auto_save = auto_save;
        self
    }

    /// Review every file of `structure` in category order, then scan order.
    ///
    /// Successful reviews go to `sink`; when `printer` is given they are also
    /// written there as plain text, whether or not the sink accepted them.
    /// Entries lost to a failed final flush count as errors, not as reviewed.
    pub fn run(
        &self,
        structure: &ProjectStructure,
        sink: &mut dyn ReportSink,
        mut printer: Option<&mut dyn Write>,
    ) -> RunSummary {
        let mut summary = RunSummary::default();
        // Entries accepted by the sink but not yet written to disk.
        let mut unsaved = 0;

        for (name, files) in structure.iter() {
            let Some(category) = self.registry.get(name) else {
                tracing::error!(category = name, files = files.len(), "Unknown category");
                summary.errors += files.len();
                continue;
            };

            for path in files {
                let shown = display_path(structure.root(), path);
                if let Some(progress) = &self.progress {
                    progress.start_file(&shown);
                }
                tracing::info!(category = name, path = %shown, "Analyzing file");

                match self.review_file(category, path) {
                    Ok(review) => {
                        match sink.add_entry(path, &review, self.auto_save) {
                            Ok(_) => {
                                summary.reviewed += 1;
                                unsaved = if self.auto_save { 0 } else { unsaved + 1 };
                            }
                            Err(e) => {
                                summary.errors += 1;
                                log_failure(&shown, &e);
                            }
                        }
                        if let Some(out) = printer.as_deref_mut() {
                            print_review(out, &shown, &review);
                        }
                    }
                    Err(e) => {
                        summary.errors += 1;
                        log_failure(&shown, &e);
                    }
                }

                if let Some(progress) = &self.progress {
                    progress.inc();
                }
            }
        }

        if let Err(e) = sink.flush() {
            tracing::error!(error = %e, entries = unsaved, "Failed to save report");
            summary.reviewed -= unsaved;
            summary.errors += unsaved.max(1);
        }
        if let Some(progress) = &self.progress {
            progress.finish();
        }

        summary
    }

    fn review_file(&self, category: &Category, path: &Path) -> Result<String> {
        let content = self.reader.read(path)?;
        let review = self.reviewer.review(category, &content)?;
        if review.trim().is_empty() {
            return Err(CodebuddyError::Upstream(
                "Reviewer returned an empty review".to_string(),
            ));
        }
        Ok(review)
    }
}

fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn log_failure(shown: &str, error: &CodebuddyError) {
    tracing::error!(
        path = shown,
        error = %error,
        error_type = error.error_type(),
        "Error analyzing file"
    );
}

fn print_review(out: &mut dyn Write, shown: &str, review: &str) {
    let text = markdown_to_text(review);
    if let Err(e) = write!(out, "\nFile: {shown}\n{text}\n\n").and_then(|()| out.flush()) {
        tracing::warn!(error = %e, "Failed to print review");
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
