//! # Logger
//!
//! Tracing setup for the `csync` binary, driven by the `[log]` config section.
//!
//! * Console lines go to stderr, compact and colored.
//! * With `directory` set, a daily rolling file `<name>.<date>.log` is added, written by a
//!   non-blocking worker. `json = true` switches that file to JSON lines.
//! * `level` is either a plain level (`"debug"`) or a filter directive
//!   (`"csync_contacts=trace,info"`). A plain level can be overridden with `RUST_LOG`.
//!
//! ## Example
//!
//! ```rust
//! use csync_domain::config::LogConfig;
//! use csync_logger::Logger;
//!
//! let _logger = Logger::from_config("csync", &LogConfig::default())?;
//! tracing::info!("ready");
//! # Ok::<(), csync_logger::LoggerError>(())
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};

use csync_domain::config::LogConfig;
use std::fs;
use std::path::Path;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Rolled files kept in the log directory.
const MAX_LOG_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

type BoxedLayer = Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync>;

/// Keeps the file writer alive. Drop it last so buffered lines reach the disk.
#[must_use = "Dropping this handle stops the background file writer."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Installs the global subscriber described by `config`.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for a blank `name` or an unparsable `level`.
    /// * [`LoggerError::Directory`] / [`LoggerError::Appender`] when the log directory
    ///   cannot be prepared.
    /// * [`LoggerError::Subscriber`] when a global subscriber is already installed.
    pub fn from_config(name: &str, config: &LogConfig) -> Result<Self, LoggerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Logger name cannot be empty".into(),
                context: None,
            });
        }

        let filter = env_filter(&config.level)?;
        let mut layers: Vec<BoxedLayer> =
            vec![layer().compact().with_writer(std::io::stderr).with_ansi(true).boxed()];

        let guard = match &config.directory {
            Some(dir) => {
                let (file_layer, guard) = file_layer(name, dir, config.json)?;
                layers.push(file_layer);
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry()
            .with(layers)
            .with(filter)
            .try_init()
            .context(format!("Installing logger '{name}'"))?;

        Ok(Self { guard })
    }

    /// True when log lines are also written to a file.
    #[must_use]
    pub const fn writes_file(&self) -> bool {
        self.guard.is_some()
    }
}

fn file_layer(
    name: &str,
    dir: &Path,
    json: bool,
) -> Result<(BoxedLayer, WorkerGuard), LoggerError> {
    fs::create_dir_all(dir).context(format!("Creating {}", dir.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(name)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(MAX_LOG_FILES)
        .build(dir)
        .context(format!("Opening log files in {}", dir.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file = layer().with_writer(writer).with_ansi(false);
    let file = if json { file.json().boxed() } else { file.boxed() };
    Ok((file, guard))
}

/// A plain level becomes the default directive under `RUST_LOG`; anything else must parse
/// as a full directive string.
fn env_filter(level: &str) -> Result<EnvFilter, LoggerError> {
    let level = level.trim();
    match level.parse::<LevelFilter>() {
        Ok(level) => {
            Ok(EnvFilter::builder().with_default_directive(level.into()).from_env_lossy())
        },
        Err(_) => EnvFilter::builder().parse(level).map_err(|e| {
            LoggerError::InvalidConfiguration {
                message: format!("Invalid log level or filter '{level}': {e}").into(),
                context: None,
            }
        }),
    }
}
