mod filesystem;
mod loader;
mod model;
mod validation;

pub use filesystem::{FileSystem, RealFileSystem};
pub use loader::{ConfigLoader, FileConfigLoader, LOCAL_CONFIG_NAME, LoadResult, parse_config};
pub use model::{
    ApiConfig, CategoryConfig, Config, DATA_PLACEHOLDER, DEFAULT_REPORT_DIR_NAME, LogFormat,
    LoggingConfig, PromptConfig, ReportConfig, ScannerConfig,
};
pub use validation::validate_config_semantics;

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
