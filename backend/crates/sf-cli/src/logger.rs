use crate::{CliError, CliResult};

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::{LevelFilter, Record, debug};

/// Initialize the global logger with fern.
///
/// Records go to `log_file` when set, else to stderr. Stdout is left to the
/// JSON result. Colors apply to stderr only.
pub fn initialize(
    log_level: sf_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> CliResult<()> {
    let level_filter = log_level.0;

    let output = match log_file {
        Some(ref path) => formatted(None).chain(open_log_file(path)?),
        None if colored => formatted(Some(level_colors())).chain(std::io::stderr()),
        None => formatted(None).chain(std::io::stderr()),
    };

    Dispatch::new()
        .level(level_filter)
        .level_for("sqlx", LevelFilter::Warn)
        .chain(output)
        .apply()
        .map_err(|e| CliError::Logger {
            message: format!("Failed to initialize logger: {e}"),
        })?;

    match log_file {
        Some(ref path) => debug!("Logging at {} to {}", level_filter, path.display()),
        None => debug!("Logging at {} to stderr", level_filter),
    }

    Ok(())
}

/// `[<timestamp> - <LEVEL>] message [file:line]`
fn formatted(colors: Option<ColoredLevelConfig>) -> Dispatch {
    Dispatch::new().format(move |out, message, record| {
        let timestamp = humantime::format_rfc3339_millis(SystemTime::now());
        let source = source_of(record);
        match colors {
            Some(colors) => out.finish(format_args!(
                "[{timestamp} - {}] {message} [{source}]",
                colors.color(record.level())
            )),
            None => out.finish(format_args!(
                "[{timestamp} - {}] {message} [{source}]",
                record.level()
            )),
        }
    })
}

fn level_colors() -> ColoredLevelConfig {
    ColoredLevelConfig::new()
        .trace(Color::Magenta)
        .debug(Color::Blue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red)
}

fn open_log_file(path: &Path) -> CliResult<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CliError::Logger {
            message: format!("Failed to create log directory {}: {}", parent.display(), e),
        })?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CliError::Logger {
            message: format!("Failed to open log file {}: {}", path.display(), e),
        })
}

/// `file:line` of the log call site.
pub fn source_of(record: &Record) -> String {
    format!(
        "{}:{}",
        record.file().unwrap_or("unknown"),
        record.line().unwrap_or(0)
    )
}
