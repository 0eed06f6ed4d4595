use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodebuddyError {
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("File is not valid UTF-8 text: {path}")]
    Decode { path: PathBuf },

    #[error("Failed to access file: {path}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid ignore pattern: {pattern}")]
    InvalidIgnorePattern {
        pattern: String,
        #[source]
        source: ignore::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Git error: {0}")]
    Git(String),
}

impl CodebuddyError {
    /// Map an I/O error raised while touching `path` onto the error taxonomy.
    #[must_use]
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            io::ErrorKind::InvalidData => Self::Decode { path },
            _ => Self::FileAccess { path, source },
        }
    }

    /// Stable variant name, used as a structured log field.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NotFound",
            Self::PermissionDenied { .. } => "PermissionDenied",
            Self::Decode { .. } => "Decode",
            Self::FileAccess { .. } => "FileAccess",
            Self::Network(_) => "Network",
            Self::Upstream(_) => "Upstream",
            Self::InvalidArgument(_) => "InvalidArgument",
            Self::Config(_) => "Config",
            Self::InvalidPattern { .. } | Self::InvalidIgnorePattern { .. } => "InvalidPattern",
            Self::Io(_) => "Io",
            Self::TomlParse(_) => "TomlParse",
            Self::Json(_) => "Json",
            Self::Git(_) => "Git",
        }
    }
}

pub type Result<T> = std::result::Result<T, CodebuddyError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
