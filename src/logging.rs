// src/logging.rs
// =============================================================================
// Logging setup: tracing events go to two places at once
// - stderr, for whoever is watching the run
// - logs/parser.log.<date>, rotated daily, last few files kept
//
// The level comes from -v (info, debug, trace); RUST_LOG overrides it.
// init_logging() returns a guard that flushes the file writer on drop, so
// main() has to keep it alive until the very end.
// =============================================================================

use std::path::{Path, PathBuf};

use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{LOG_FILE_NAME, MAX_LOG_FILES};
use crate::error::{Result, ScraperError};

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LevelFilter,
    pub log_dir: PathBuf,
}

impl LogConfig {
    /// 0 = info, 1 = debug, 2+ = trace
    pub fn from_verbosity(verbosity: u8, log_dir: PathBuf) -> Self {
        let level = match verbosity {
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        Self { level, log_dir }
    }
}

/// Installs the global subscriber; call once, at startup
pub fn init_logging(config: &LogConfig) -> Result<WorkerGuard> {
    let appender = file_appender(&config.log_dir)?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::builder()
        .with_default_directive(config.level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .try_init()
        .map_err(|e| ScraperError::Logging(e.to_string()))?;

    Ok(guard)
}

fn file_appender(log_dir: &Path) -> Result<RollingFileAppender> {
    std::fs::create_dir_all(log_dir).map_err(|e| ScraperError::io(log_dir, e))?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_NAME)
        .max_log_files(MAX_LOG_FILES)
        .build(log_dir)
        .map_err(|e| ScraperError::Logging(e.to_string()))
}
