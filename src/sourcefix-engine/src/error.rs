//! Error types for fix runs.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for fix operations.
pub type FixResult<T> = Result<T, FixError>;

/// Errors that can occur while enumerating, reading, rewriting or writing files.
///
/// `NotFound`, `InvalidPattern`, `InvalidGlob` and `UnknownRule` abort a run
/// before any file is touched. The rest are caught at the per-file boundary
/// and recorded in the run report.
#[derive(Debug, Error)]
pub enum FixError {
    /// The root directory is missing or is not a directory.
    #[error("Root directory not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read a candidate file (permissions, invalid UTF-8).
    #[error("Failed to read file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a rewritten file back.
    #[error("Failed to write file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory entry could not be enumerated.
    #[error("Failed to enumerate {path}: {message}")]
    Walk { path: PathBuf, message: String },

    /// A rule pattern failed to compile.
    #[error("Invalid pattern for rule '{rule}': {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: Box<regex::Error>,
    },

    /// The file name filter is not a valid glob.
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// A rule was selected by name but is not registered.
    #[error("Unknown rule: {0}")]
    UnknownRule(String),
}

impl FixError {
    /// Create a not found error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a read error.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Create a write error.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid pattern error.
    pub fn invalid_pattern(rule: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            rule: rule.into(),
            source: Box::new(source),
        }
    }
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
