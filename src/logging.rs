use std::fs;
use std::io::IsTerminal;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{CodebuddyError, Result};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Keeps the background log file writer alive. Drop it last.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Level implied by `-v`/`-q` flags, `None` to keep the configured one.
#[must_use]
pub const fn verbosity_level(verbose: u8, quiet: bool) -> Option<&'static str> {
    if quiet {
        return Some("warn");
    }
    match verbose {
        0 => None,
        1 => Some("debug"),
        _ => Some("trace"),
    }
}

/// `RUST_LOG` when set and non-empty, otherwise the configured level.
fn filter_directive(env_value: Option<String>, configured: &str) -> String {
    env_value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| configured.to_string())
}

/// # Errors
/// Returns `Config` if the directive is not a valid filter.
pub fn build_filter(env_value: Option<String>, configured: &str) -> Result<EnvFilter> {
    let directive = filter_directive(env_value, configured);
    EnvFilter::try_new(&directive)
        .map_err(|e| CodebuddyError::Config(format!("Invalid log filter '{directive}': {e}")))
}

fn format_layer<W>(format: LogFormat, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer().with_writer(writer).with_ansi(ansi);
    match format {
        LogFormat::Full => layer.boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

fn file_layer(format: LogFormat, path: &Path) -> Result<(BoxedLayer, WorkerGuard)> {
    let file_name = path.file_name().ok_or_else(|| {
        CodebuddyError::Config(format!("Log file path has no file name: {}", path.display()))
    })?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| CodebuddyError::from_io(dir, e))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .map_err(|e| CodebuddyError::Config(format!("Failed to open log file: {e}")))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    Ok((format_layer(format, writer, false), guard))
}

/// Install the global subscriber: stderr plus an optional log file, both
/// filtered by `RUST_LOG` or `config.level`.
///
/// # Errors
/// Returns an error if the filter is invalid, the log file cannot be opened
/// or a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<LogGuard> {
    let filter = build_filter(std::env::var("RUST_LOG").ok(), &config.level)?;

    let mut layers = vec![format_layer(
        config.format,
        std::io::stderr,
        std::io::stderr().is_terminal(),
    )];
    let mut file_guard = None;
    if let Some(path) = &config.file {
        let (layer, guard) = file_layer(config.format, path)?;
        layers.push(layer);
        file_guard = Some(guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| CodebuddyError::Config(format!("Failed to initialise logging: {e}")))?;

    Ok(LogGuard { _file: file_guard })
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
