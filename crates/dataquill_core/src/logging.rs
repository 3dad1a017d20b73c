//! Tracing subscriber setup.
//!
//! Interactive terminals get colored stdout only. Otherwise events go to a
//! daily rotated `dataquill.<date>.log` in the log directory, with INFO and
//! above mirrored to stdout. If the directory cannot be used, logging falls
//! back to stdout.
//!
//! Filter precedence: `logging.filter` in the config, then `DATAQUILL_LOG`,
//! then `RUST_LOG`, then [`default_log_filter`].

use std::path::PathBuf;

use crate::config::LoggingConfig;
use crate::error::QuillError;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Environment variable consulted for a filter directive.
pub const LOG_ENV_VAR: &str = "DATAQUILL_LOG";

/// Resolved logging settings.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub log_dir: PathBuf,
    /// Stdout is a terminal; skip the file appender.
    pub interactive: bool,
    pub filter: Option<String>,
}

impl LogConfig {
    pub fn new(log_dir: PathBuf) -> Self {
        Self { log_dir, interactive: atty::is(atty::Stream::Stdout), filter: None }
    }

    /// Resolve the `logging` section of the workspace config.
    pub fn from_config(config: &LoggingConfig) -> Self {
        Self {
            filter: config.filter.clone(),
            ..Self::new(config.directory.clone().unwrap_or_else(log_dir))
        }
    }
}

/// Keeps the non-blocking file writer alive.
///
/// Hold it until exit; dropping it flushes buffered events.
pub struct LoggingGuard {
    _writer: Option<WorkerGuard>,
}

/// Install the global subscriber.
pub fn init_logging(config: LogConfig) -> LoggingGuard {
    if config.interactive {
        return init_stdout(config.filter.as_deref());
    }

    match init_file_and_stdout(&config) {
        Ok(writer) => LoggingGuard { _writer: Some(writer) },
        Err(e) => {
            eprintln!("warning: {e}; logging to stdout only");
            init_stdout(config.filter.as_deref())
        }
    }
}

fn init_stdout(filter: Option<&str>) -> LoggingGuard {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(filter))
        .with_ansi(true)
        .with_target(false)
        .init();

    LoggingGuard { _writer: None }
}

fn init_file_and_stdout(config: &LogConfig) -> Result<WorkerGuard, QuillError> {
    std::fs::create_dir_all(&config.log_dir).map_err(|e| {
        QuillError::io_with_source(
            format!("Cannot create log directory {}", config.log_dir.display()),
            e,
        )
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("dataquill")
        .filename_suffix("log")
        .build(&config.log_dir)
        .map_err(|e| QuillError::internal_with_source("Cannot open log file", e))?;

    // File writes happen on the appender's worker thread
    let (file, guard) = tracing_appender::non_blocking(appender);
    let writer = std::io::stdout.with_max_level(tracing::Level::INFO).and(file);

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(env_filter(config.filter.as_deref()))
        .with_ansi(false)
        .with_target(true)
        .init();

    Ok(guard)
}

fn env_filter(configured: Option<&str>) -> EnvFilter {
    let fallback = || EnvFilter::new(default_log_filter());
    match configured {
        Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|_| fallback()),
        None => EnvFilter::try_from_env(LOG_ENV_VAR)
            .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
            .unwrap_or_else(|_| fallback()),
    }
}

/// Filter used when nothing else is configured.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "debug,dataquill=trace,dataquill_core=trace,dataquill_ui=debug,gpui=info"
    } else {
        "info,dataquill_core=info,gpui=warn"
    }
}

/// `<data dir>/logs`.
pub fn log_dir() -> PathBuf {
    default_data_dir().join("logs")
}

/// Debug builds keep their data under the working directory.
pub fn default_data_dir() -> PathBuf {
    let local = || PathBuf::from("./dataquill_data");
    if cfg!(debug_assertions) {
        local()
    } else {
        dirs::data_dir().map(|d| d.join("dataquill")).unwrap_or_else(local)
    }
}
