//! Logging initialization.
//!
//! With `--verbose` logs go to stderr. Otherwise they are appended to a file
//! in the platform log directory so the menu's stdout stays clean.

use quill_core::Config;
use quill_util::log::LogConfig;
use quill_util::LogLevel;
use std::path::PathBuf;

/// Initialize logging from the CLI flag and the loaded configuration.
/// Returns the log file path if logging to file.
pub fn init_logging(verbose: bool, config: &Config) -> Option<PathBuf> {
    let level = if verbose {
        LogLevel::Debug
    } else {
        config.log_level.map(Into::into).unwrap_or(LogLevel::Info)
    };

    let log_config = LogConfig {
        print: verbose,
        level,
        include_location: verbose,
        file: None,
    };

    match quill_util::log::init(log_config) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Warning: Could not initialize logging: {e}");
            None
        }
    }
}
