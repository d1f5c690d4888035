//! Logging setup and run-level log helpers.
//!
//! A [`LogContext`] installs a `tracing` subscriber with a console layer and
//! an optional file layer writing `test_run_<YYYYmmdd_HHMMSS>.log`. Processes
//! install it once with [`LogContext::global`]; tests use
//! [`LogContext::scoped`], which only affects the current thread and is
//! removed when the context is dropped.

use crate::result::{ProbeError, ProbeResult};
use serde::Serialize;
use std::fmt::Display;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// Width of the banner line opening each test
const BANNER_WIDTH: usize = 80;

/// Console output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Where and how much to log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Directory for the run log; no file is written when unset
    pub dir: Option<PathBuf>,
    /// Write to stderr
    pub console: bool,
    /// Console verbosity unless `RUST_LOG` is set
    pub console_level: LevelFilter,
    /// File verbosity
    pub file_level: LevelFilter,
    /// Console format
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: None,
            console: true,
            console_level: LevelFilter::INFO,
            file_level: LevelFilter::DEBUG,
            format: LogFormat::Pretty,
        }
    }
}

impl LogConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the run log into `dir`
    #[must_use]
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Enable or disable console output
    #[must_use]
    pub const fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    /// Set console verbosity
    #[must_use]
    pub const fn with_console_level(mut self, level: LevelFilter) -> Self {
        self.console_level = level;
        self
    }

    /// Set file verbosity
    #[must_use]
    pub const fn with_file_level(mut self, level: LevelFilter) -> Self {
        self.file_level = level;
        self
    }

    /// Set console format
    #[must_use]
    pub const fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

/// File name of a run log started at `now`
#[must_use]
pub fn log_file_name(now: chrono::DateTime<chrono::Local>) -> String {
    now.format("test_run_%Y%m%d_%H%M%S.log").to_string()
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// An installed logging subscriber
#[derive(Debug)]
pub struct LogContext {
    log_file: Option<PathBuf>,
    _guard: Option<DefaultGuard>,
}

impl LogContext {
    /// Install the subscriber for the whole process
    ///
    /// Fails when another global subscriber is already installed.
    pub fn global(config: &LogConfig) -> ProbeResult<Self> {
        let (layers, log_file) = build_layers(config)?;
        tracing::subscriber::set_global_default(tracing_subscriber::registry().with(layers))
            .map_err(|e| ProbeError::config(format!("cannot install logger: {e}")))?;
        Ok(Self {
            log_file,
            _guard: None,
        })
    }

    /// Install the subscriber for the current thread until dropped
    pub fn scoped(config: &LogConfig) -> ProbeResult<Self> {
        let (layers, log_file) = build_layers(config)?;
        let guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(layers));
        Ok(Self {
            log_file,
            _guard: Some(guard),
        })
    }

    /// Path of the run log, when file output is on
    #[must_use]
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }
}

fn build_layers(config: &LogConfig) -> ProbeResult<(Vec<BoxedLayer>, Option<PathBuf>)> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    if config.console {
        let filter = EnvFilter::builder()
            .with_default_directive(config.console_level.into())
            .from_env_lossy();
        let layer = match config.format {
            LogFormat::Pretty => fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(filter)
                .boxed(),
            LogFormat::Json => fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_filter(filter)
                .boxed(),
        };
        layers.push(layer);
    }

    let mut log_file = None;
    if let Some(dir) = &config.dir {
        fs::create_dir_all(dir)?;
        let path = dir.join(log_file_name(chrono::Local::now()));
        let file = File::create(&path)?;
        layers.push(
            fmt::layer()
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_writer(Mutex::new(file))
                .with_filter(config.file_level)
                .boxed(),
        );
        log_file = Some(path);
    }

    Ok((layers, log_file))
}

// =============================================================================
// RUN LOG HELPERS
// =============================================================================

/// Banner and parameters at the start of a test
pub fn test_started(name: &str, params: &serde_json::Value) {
    tracing::info!("{}", "=".repeat(BANNER_WIDTH));
    tracing::info!(test = name, "Starting test: {name}");
    if !params.is_null() {
        tracing::info!(test = name, "Test parameters: {params}");
    }
}

/// Outcome line at the end of a test
pub fn test_finished(name: &str, passed: bool) {
    if passed {
        tracing::info!(test = name, "Test {name} PASSED");
    } else {
        tracing::error!(test = name, "Test {name} FAILED");
    }
}

/// Expected and actual value of a check
pub fn assertion(expected: &dyn Display, actual: &dyn Display, message: &str, passed: bool) {
    if passed {
        tracing::info!(
            expected = %expected,
            actual = %actual,
            "Assertion: Expected='{expected}', Actual='{actual}' - {message}"
        );
    } else {
        tracing::error!(
            expected = %expected,
            actual = %actual,
            "Assertion failed: Expected='{expected}', Actual='{actual}' - {message}"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_log_file_name() {
        let at = chrono::Local
            .with_ymd_and_hms(2024, 3, 9, 7, 5, 1)
            .single()
            .unwrap();
        assert_eq!(log_file_name(at), "test_run_20240309_070501.log");
    }

    #[test]
    fn test_config_builder() {
        let config = LogConfig::new()
            .with_dir("/tmp/logs")
            .with_console(false)
            .with_console_level(LevelFilter::WARN)
            .with_file_level(LevelFilter::TRACE)
            .with_format(LogFormat::Json);
        assert_eq!(config.dir, Some(PathBuf::from("/tmp/logs")));
        assert!(!config.console);
        assert_eq!(config.console_level, LevelFilter::WARN);
        assert_eq!(config.file_level, LevelFilter::TRACE);
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_scoped_context_writes_run_log() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig::new().with_dir(dir.path()).with_console(false);
        let ctx = LogContext::scoped(&config).unwrap();
        let path = ctx.log_file().unwrap().to_path_buf();

        test_started("valid_login", &serde_json::json!({"username": "standard_user"}));
        assertion(&"Products", &"Products", "title matches", true);
        tracing::debug!("primitive detail");
        tracing::trace!("below file level");
        test_finished("valid_login", true);
        drop(ctx);

        let log = fs::read_to_string(&path).unwrap();
        assert!(log.contains(&"=".repeat(BANNER_WIDTH)));
        assert!(log.contains("Starting test: valid_login"));
        assert!(log.contains("Test parameters:"));
        assert!(log.contains("Assertion: Expected='Products', Actual='Products' - title matches"));
        assert!(log.contains("primitive detail"));
        assert!(!log.contains("below file level"));
        assert!(log.contains("Test valid_login PASSED"));
        assert!(log.contains("logging.rs"));
    }

    #[test]
    fn test_no_dir_means_no_file() {
        let ctx = LogContext::scoped(&LogConfig::new().with_console(false)).unwrap();
        assert!(ctx.log_file().is_none());
    }
}
