use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::LogFormat;
use crate::git::validate_git_url;
use crate::review::validate_api_url;

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    /// Human-readable with timestamps and targets
    Full,
    /// Single-line, abbreviated
    Compact,
    /// Newline-delimited JSON
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Full => Self::Full,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}

fn parse_api_url(value: &str) -> Result<String, String> {
    validate_api_url(value)
        .map(|_| value.to_string())
        .map_err(|e| e.to_string())
}

fn parse_git_url(value: &str) -> Result<String, String> {
    validate_git_url(value)
        .map(|_| value.to_string())
        .map_err(|e| e.to_string())
}

#[derive(Parser, Debug)]
#[command(name = "codebuddy")]
#[command(
    author,
    version,
    about = "CodeBuddy reviews a git repository file by file using a language model"
)]
#[command(long_about = "CodeBuddy reviews a git repository file by file using a language model \
    and writes the reviews to a Markdown report.\n\n\
    Exit codes:\n  \
    0 - All files reviewed\n  \
    1 - Completed, but some files could not be reviewed\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Repository directory to analyze (created if it does not exist)
    #[arg(value_name = "REPOSITORY_DIR")]
    pub repository_dir: PathBuf,

    /// URL of the language model API
    #[arg(long = "api", value_name = "URL", value_parser = parse_api_url)]
    pub api_url: Option<String>,

    /// Clone a remote repository into REPOSITORY_DIR before analyzing it
    #[arg(long = "clone", value_name = "URL", value_parser = parse_git_url)]
    pub repository_url: Option<String>,

    /// Directory for storing reports [default: REPOSITORY_DIR/reports]
    #[arg(long = "reports", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Display all reviews in the terminal
    #[arg(long = "print")]
    pub print_reports: bool,

    /// Path to configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Skip loading configuration file
    #[arg(long)]
    pub no_config: bool,

    /// Increase log verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log line format
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormatArg>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
