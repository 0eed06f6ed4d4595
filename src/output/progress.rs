use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str =
    "{spinner:.green} Reviewing [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {wide_msg}";

/// Progress bar over the files of one review run.
///
/// Disabled in quiet mode, in print mode (reviews go to stdout) and when
/// stderr is not a TTY.
#[derive(Clone)]
pub struct ReviewProgress {
    progress_bar: ProgressBar,
}

impl ReviewProgress {
    /// Creates a progress bar drawn on stderr.
    #[must_use]
    pub fn new(total: u64, hidden: bool) -> Self {
        let is_tty = std::io::stderr().is_terminal();
        Self::new_with_visibility(total, hidden, is_tty)
    }

    fn new_with_visibility(total: u64, hidden: bool, is_tty: bool) -> Self {
        let progress_bar = if hidden || !is_tty {
            ProgressBar::hidden()
        } else {
            Self::create_visible_progress_bar(total)
        };
        Self { progress_bar }
    }

    fn create_visible_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar().template(TEMPLATE) {
            pb.set_style(style.progress_chars("█▓░"));
        }
        pb
    }

    /// Show the file currently under review.
    pub fn start_file(&self, display: &str) {
        self.progress_bar.set_message(display.to_string());
    }

    /// Mark one file as done, successful or not.
    pub fn inc(&self) {
        self.progress_bar.inc(1);
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.progress_bar.position()
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.progress_bar.is_hidden()
    }

    /// Finishes the progress bar and clears it from the terminal.
    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
