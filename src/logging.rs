//! File logging. The terminal UI owns stdout, so everything goes to a log file.

use anyhow::{Context, Result, anyhow};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "yearcal";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Where the log goes: an explicit file, or rotating files under `<config_dir>/logs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Dir(PathBuf),
}

impl LogTarget {
    pub fn resolve(log_file: Option<&Path>, config_dir: &Path) -> Self {
        match log_file {
            Some(path) => LogTarget::File(path.to_path_buf()),
            None => LogTarget::Dir(config_dir.join("logs")),
        }
    }
}

/// Starts the logger. `RUST_LOG` overrides `level` when set.
///
/// The returned handle must be kept alive for the life of the program.
pub fn init_logging(level: &str, target: &LogTarget) -> Result<LoggerHandle> {
    let level = normalize_level(level)?;
    let logger = Logger::try_with_env_or_str(level)
        .with_context(|| format!("invalid log level `{level}`"))?;

    let logger = match target {
        LogTarget::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            logger.log_to_file(
                FileSpec::try_from(path.as_path())
                    .with_context(|| format!("invalid log file {}", path.display()))?,
            )
        }
        LogTarget::Dir(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(dir.as_path())
                        .basename(LOG_FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
        }
    };

    let handle = logger
        .append()
        .write_mode(WriteMode::BufferAndFlush)
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .context("failed to start logger")?;

    info!(
        "yearcal {} starting level={}",
        env!("CARGO_PKG_VERSION"),
        level
    );
    Ok(handle)
}

fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(anyhow!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error|off"
        )),
    }
}
