//! Error types for footprint generation.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::footprint::validate::Parameter;

/// Result type for footprint operations.
pub type FootprintResult<T> = Result<T, FootprintError>;

/// Errors that can occur while generating a footprint module.
#[derive(Debug, Error)]
pub enum FootprintError {
    /// A parameter violated a validation rule. Correctable by the caller.
    #[error("Invalid parameter '{parameter}': {message}")]
    InvalidParameter {
        /// The first parameter whose rule was violated.
        parameter: Parameter,
        /// Description of what's wrong.
        message: String,
    },

    /// Unrecognised package topology tag.
    #[error("Unsupported package: {tag}")]
    UnsupportedPackage {
        /// The tag as supplied.
        tag: String,
    },

    /// Non-numeric input handed to the unit converter.
    #[error("Cannot convert '{input}' to a length")]
    UnitConversion {
        /// The offending text.
        input: String,
    },

    /// Failed to write the module file.
    #[error("Failed to write file: {path}")]
    FileWrite {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to read a generation request file.
    #[error("Failed to read request: {path}")]
    RequestRead {
        /// Path to the request file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Generation request file is not a valid footprint description.
    #[error("Failed to parse request: {path}")]
    RequestParse {
        /// Path to the request file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl FootprintError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(parameter: Parameter, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter,
            message: message.into(),
        }
    }

    /// Creates an unsupported package error.
    pub fn unsupported_package(tag: impl Into<String>) -> Self {
        Self::UnsupportedPackage { tag: tag.into() }
    }

    /// Creates a unit conversion error.
    pub fn unit_conversion(input: impl Into<String>) -> Self {
        Self::UnitConversion {
            input: input.into(),
        }
    }

    /// Creates a file write error.
    pub fn file_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Returns the violated parameter for validation failures.
    #[must_use]
    pub const fn parameter(&self) -> Option<Parameter> {
        match self {
            Self::InvalidParameter { parameter, .. } => Some(*parameter),
            _ => None,
        }
    }

    /// Returns `true` if the caller can recover by supplying corrected input.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter { .. } | Self::UnitConversion { .. }
        )
    }
}
