//! Configuration error types.
//!
//! Errors raised while generating a footprint live in
//! [`crate::footprint::error`].

use std::path::PathBuf;

use thiserror::Error;

/// Log levels accepted in `logging.level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Errors raised while loading `config.json`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configuration file named with `--config` does not exist.
    #[error("configuration file {path} does not exist (omit --config to use built-in defaults)")]
    Missing {
        /// The path given on the command line.
        path: PathBuf,
    },

    /// The configuration file exists but could not be read.
    #[error("cannot read configuration file {path}")]
    Unreadable {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON or has unknown keys.
    #[error("malformed configuration file {path}")]
    Malformed {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// `output_dir` cannot hold module files.
    #[error("output_dir '{}' {reason}", path.display())]
    InvalidOutputDir {
        /// The configured directory.
        path: PathBuf,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// `logging.level` is not a known level.
    #[error("unknown log level '{level}' (expected one of: {})", LOG_LEVELS.join(", "))]
    InvalidLogLevel {
        /// The configured level.
        level: String,
    },
}
