use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the file content inside a category prompt.
pub const DATA_PLACEHOLDER: &str = "{data}";

/// Default name of the reports directory created under the repository.
pub const DEFAULT_REPORT_DIR_NAME: &str = "reports";

const SYSTEM_PROMPT: &str = "
You're an expert in code analysis.
Your task is to use all your knowledge about professional programming standards to generate high-quality reports.
";

const CODE_REVIEW_PROMPT: &str = "
Create a report about the source code of the project.
Write 10 bugs, failed solutions or other problems as short as possible.
Do not write code samples, try to fit into 400 tokens.

{data}
";

const DOCS_REVIEW_PROMPT: &str = "
Create a project documentation report.
Write 10 bugs, failed solutions or other problems as short as possible.
Do not write examples, try to fit within 400 tokens.

{data}
";

const CODE_EXTENSIONS: &[&str] = &[
    ".py", ".js", ".ts", ".java", ".c", ".cpp", ".h", ".hpp", ".cs", ".go", ".rb", ".php",
    ".swift", ".kt", ".rs", ".m", ".mm",
];

const DOCS_EXTENSIONS: &[&str] = &[
    ".md", ".markdown", ".txt", ".rst", ".pdf", ".docx", ".xlsx", ".xls", ".pptx", ".odt",
    ".rtf", ".log",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub prompts: PromptConfig,

    /// Review categories in matching order. The first category whose
    /// extension set contains a file's extension wins.
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryConfig>,

    #[serde(default)]
    pub scanner: ScannerConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            prompts: PromptConfig::default(),
            categories: default_categories(),
            scanner: ScannerConfig::default(),
            report: ReportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Chat completion endpoint settings [api].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the language model service.
    #[serde(default = "default_api_url")]
    pub url: String,

    /// Endpoint path resolved against `url`.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Request timeout. No timeout when absent.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            endpoint: default_endpoint(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptConfig {
    #[serde(default = "default_system_prompt")]
    pub system: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            system: default_system_prompt(),
        }
    }
}

/// One review category [[categories]].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryConfig {
    pub name: String,

    /// Extensions such as `.py`. A missing leading dot is added on load.
    pub extensions: Vec<String>,

    /// User prompt template; must contain `{data}`.
    pub prompt: String,
}

/// Scanner configuration [scanner].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Respect the repository root `.gitignore` (default: true)
    #[serde(default = "default_true")]
    pub gitignore: bool,

    /// File basenames that are never reviewed.
    #[serde(default = "default_exclude_files")]
    pub exclude_files: Vec<String>,

    /// Relative path prefixes (forward slashes) that are never reviewed.
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,

    /// Extra glob patterns, additive to .gitignore.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            gitignore: true,
            exclude_files: default_exclude_files(),
            exclude_dirs: default_exclude_dirs(),
            exclude: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportConfig {
    /// Directory created under the repository when `--reports` is not given.
    #[serde(default = "default_report_dir_name")]
    pub dir_name: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dir_name: default_report_dir_name(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

/// Logging configuration [logging].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Also write logs to this file.
    #[serde(default)]
    pub file: Option<PathBuf>,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
            format: LogFormat::Full,
        }
    }
}

const fn default_true() -> bool {
    true
}

fn default_api_url() -> String {
    "http://localhost:1234".to_string()
}

fn default_endpoint() -> String {
    "v1/chat/completions".to_string()
}

const fn default_max_tokens() -> u32 {
    500
}

const fn default_temperature() -> f64 {
    0.5
}

fn default_system_prompt() -> String {
    SYSTEM_PROMPT.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_report_dir_name() -> String {
    DEFAULT_REPORT_DIR_NAME.to_string()
}

fn default_exclude_files() -> Vec<String> {
    ["LICENSE", "requirements.txt", "__init__.py"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_exclude_dirs() -> Vec<String> {
    vec![format!("{DEFAULT_REPORT_DIR_NAME}/"), ".git/".to_string()]
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

pub(crate) fn default_categories() -> Vec<CategoryConfig> {
    vec![
        CategoryConfig {
            name: "code".to_string(),
            extensions: to_strings(CODE_EXTENSIONS),
            prompt: CODE_REVIEW_PROMPT.to_string(),
        },
        CategoryConfig {
            name: "docs".to_string(),
            extensions: to_strings(DOCS_EXTENSIONS),
            prompt: DOCS_REVIEW_PROMPT.to_string(),
        },
    ]
}
