//! Error handling module: defines unified error types for treeex.
//!
//! This module provides a hierarchical error type system covering:
//!
//! - **CLI parsing errors**: argument format, duplicates, unknown options
//! - **Configuration errors**: re-exported from `config` module for API consistency
//! - **Scan errors**: root validation and directory listing failures
//! - **Output errors**: file creation, writing, text encoding
//!
//! Only the startup failures are fatal. A directory that cannot be listed
//! during traversal is reported inline by the renderer and never reaches
//! `main` as an error.
//!
//! File: src/error.rs
//! Date: 2026-10-16

#![forbid(unsafe_code)]

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub use crate::config::ConfigError;

/// Top-level error type for treeex.
///
/// Aggregates all sub-module errors as the unified error return type for the
/// program's main entry point. Supports automatic conversion from all sub-error
/// types via the `From` trait.
///
/// # Examples
///
/// ```
/// use treeex::error::{TreeexError, ScanError};
/// use std::path::PathBuf;
///
/// let scan_err = ScanError::NotADirectory {
///     path: PathBuf::from("Cargo.toml"),
/// };
/// let err: TreeexError = scan_err.into();
/// assert!(matches!(err, TreeexError::Scan(_)));
/// ```
#[derive(Debug, Error)]
pub enum TreeexError {
    /// CLI parsing error.
    #[error(transparent)]
    Cli(#[from] CliError),

    /// Configuration validation error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Root validation or directory listing error.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Output error.
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Result type alias for treeex operations.
pub type TreeexResult<T> = Result<T, TreeexError>;

/// CLI argument parsing errors.
///
/// # Examples
///
/// ```
/// use treeex::error::CliError;
///
/// let err = CliError::MissingValue {
///     option: "/O".to_string(),
/// };
/// assert!(err.to_string().contains("/O"));
/// assert!(err.to_string().contains("requires a value"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CliError {
    /// Unknown option was provided.
    #[error("Unknown option: {option}")]
    UnknownOption {
        /// The unrecognized option name.
        option: String,
    },

    /// Option is missing its required value.
    #[error("Option {option} requires a value.")]
    MissingValue {
        /// The option name.
        option: String,
    },

    /// Option was specified more than once.
    #[error("Option {option} was specified more than once.")]
    DuplicateOption {
        /// The option name.
        option: String,
    },

    /// Multiple paths were specified when only one is allowed.
    #[error("Only one path can be specified, but multiple were provided: {paths:?}")]
    MultiplePaths {
        /// All discovered paths.
        paths: Vec<String>,
    },
}

/// Directory scanning errors.
///
/// `PathNotFound`, `NotADirectory` and `MetadataFailed` come from root
/// validation and are fatal. `ReadDirFailed` and `WalkError` come from
/// listing a single directory; the renderer turns them into an inline
/// access-error annotation.
///
/// # Examples
///
/// ```
/// use std::io;
/// use std::path::PathBuf;
/// use treeex::error::ScanError;
///
/// let err = ScanError::PathNotFound {
///     path: PathBuf::from("missing"),
///     source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
/// };
/// assert!(err.to_string().contains("Path not found"));
/// ```
#[derive(Debug, Error)]
pub enum ScanError {
    /// The specified path does not exist.
    #[error("Path not found: {path}")]
    PathNotFound {
        /// The non-existent path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The specified path is not a directory.
    #[error("Path is not a directory: {path}")]
    NotADirectory {
        /// The non-directory path.
        path: PathBuf,
    },

    /// Failed to retrieve metadata for the root path.
    #[error("Failed to retrieve metadata: {path}")]
    MetadataFailed {
        /// The file path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Failed to read directory contents.
    #[error("Failed to read directory: {path}")]
    ReadDirFailed {
        /// The directory path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Error during directory walk that carries no IO error.
    #[error("Directory walk error: {message}")]
    WalkError {
        /// Error message.
        message: String,
        /// Related path, if available.
        path: Option<PathBuf>,
    },
}

impl ScanError {
    /// Creates a root validation error from an IO error.
    ///
    /// `NotFound` maps to `PathNotFound`; anything else (permission denied
    /// on a parent, broken link, ...) maps to `MetadataFailed`.
    #[must_use]
    pub fn from_io_error(err: io::Error, path: PathBuf) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::PathNotFound { path, source: err },
            _ => Self::MetadataFailed { path, source: err },
        }
    }

    /// Returns the underlying failure description.
    ///
    /// This is the OS message for IO-backed variants and the full message
    /// otherwise. Used for the detail line under an access error.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::PathNotFound { source, .. }
            | Self::MetadataFailed { source, .. }
            | Self::ReadDirFailed { source, .. } => source.to_string(),
            Self::NotADirectory { .. } | Self::WalkError { .. } => self.to_string(),
        }
    }
}

impl From<walkdir::Error> for ScanError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(PathBuf::from);
        let message = err.to_string();
        match (err.into_io_error(), path) {
            (Some(io_err), Some(p)) => Self::ReadDirFailed {
                path: p,
                source: io_err,
            },
            (_, path) => Self::WalkError { message, path },
        }
    }
}

/// Output errors.
///
/// # Examples
///
/// ```
/// use treeex::error::OutputError;
///
/// let err = OutputError::EncodingFailed {
///     encoding: "UTF-8".to_string(),
///     line: "abc".to_string(),
/// };
/// assert!(err.to_string().contains("UTF-8"));
/// ```
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to create output file.
    #[error("Failed to create output file: {path}")]
    FileCreateFailed {
        /// The file path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Failed to write to the output file.
    #[error("Failed to write file: {path}")]
    WriteFailed {
        /// The file path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Failed to write to stdout.
    #[error("Failed to write to stdout")]
    StdoutFailed {
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// A line could not be represented in the destination encoding.
    #[error("Failed to encode line as {encoding}: {line:?}")]
    EncodingFailed {
        /// Name of the destination encoding.
        encoding: String,
        /// The offending line.
        line: String,
    },
}

impl From<io::Error> for OutputError {
    fn from(err: io::Error) -> Self {
        Self::StdoutFailed { source: err }
    }
}
