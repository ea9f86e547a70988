//! Error types for RepoFetch.
//!
//! This module defines the error hierarchy using `thiserror`. All errors
//! include context and can be easily propagated using the `?` operator.
//!
//! # Error Categories
//!
//! - **Resolution errors**: malformed references, missing archive refs
//! - **Tool errors**: the external git client cannot be located
//! - **Transport errors**: clone or download failures, upstream cause preserved
//! - **IO errors**: file system operations
//! - **Config errors**: invalid configuration files

use std::path::PathBuf;
use thiserror::Error;

/// Macro to create errors with automatic source location tracking.
///
/// Usage:
/// ```ignore
/// return Err(err!(InvalidReference { reference: String::new() }));
/// ```
#[macro_export]
macro_rules! err {
    ($variant:ident { $($field:ident: $value:expr),* $(,)? }) => {
        $crate::error::RepoFetchError::$variant {
            $($field: $value,)*
            src_path: file!(),
            src_line: line!(),
        }
    };
}

/// A specialized Result type for RepoFetch operations.
pub type Result<T> = std::result::Result<T, RepoFetchError>;

/// The main error type for RepoFetch.
///
/// Covers every failure that can occur during reference resolution,
/// cloning, and archive download.
#[derive(Error, Debug)]
pub enum RepoFetchError {
    // =========================================================================
    // Resolution Errors
    // =========================================================================
    /// The repository reference is empty or malformed.
    #[error("Invalid repository reference '{reference}' ({src_path}:{src_line})")]
    InvalidReference {
        /// The offending reference string
        reference: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// No provider is registered for the host.
    #[error("Unsupported host '{host}' ({src_path}:{src_line})")]
    UnsupportedHost {
        /// The unrecognized host
        host: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// An archive snapshot was requested without a checkout ref on a host
    /// whose default branch cannot be assumed.
    #[error("Archive download from '{host}' requires an explicit checkout ref ({src_path}:{src_line})")]
    CheckoutRequired {
        /// The host that needs an explicit ref
        host: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Tool Errors
    // =========================================================================
    /// The external version-control client cannot be located.
    #[error("Tool '{tool}' is not usable ({src_path}:{src_line}): {message}")]
    ToolUnavailable {
        /// The missing tool name
        tool: String,
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Git clone or checkout failure.
    #[error("Failed to clone repository '{url}' ({src_path}:{src_line}): {message}")]
    CloneFailed {
        /// The repository URL
        url: String,
        /// Error message, upstream cause preserved verbatim
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// Archive download failure.
    #[error("Failed to download archive '{url}' ({src_path}:{src_line}): {message}")]
    DownloadFailed {
        /// The archive URL
        url: String,
        /// HTTP status code (if the server responded)
        status_code: Option<u16>,
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// Archive extraction failure.
    #[error("Failed to extract archive '{path}' ({src_path}:{src_line}): {message}")]
    ExtractFailed {
        /// The archive file path
        path: PathBuf,
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // I/O and File System Errors
    // =========================================================================
    /// I/O error with path context.
    #[error("I/O error at '{path}' ({src_path}:{src_line}): {source}")]
    Io {
        /// The path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration parsing error.
    #[error("Failed to parse configuration ({src_path}:{src_line}): {message}")]
    ConfigParse {
        /// Error message
        message: String,
        /// The underlying error (if any)
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Generic Errors
    // =========================================================================
    /// Internal error (should not happen in normal operation).
    #[error("Internal error ({src_path}:{src_line}): {message}")]
    Internal {
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },
}

impl RepoFetchError {
    /// Creates an `Io` error.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error, src_path: &'static str, src_line: u32) -> Self {
        Self::Io { path: path.into(), source, src_path, src_line }
    }

    /// Creates an `Internal` error.
    #[must_use]
    pub fn internal(message: String, src_path: &'static str, src_line: u32) -> Self {
        Self::Internal { message, src_path, src_line }
    }

    /// Creates a `ConfigParse` error.
    #[must_use]
    pub fn config_parse(message: String, source: Option<Box<dyn std::error::Error + Send + Sync>>, src_path: &'static str, src_line: u32) -> Self {
        Self::ConfigParse { message, source, src_path, src_line }
    }

    /// Returns the appropriate exit code for the error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io { source, .. } if source.kind() == std::io::ErrorKind::PermissionDenied => 13,
            Self::InvalidReference { .. } | Self::UnsupportedHost { .. } => 2,
            Self::ToolUnavailable { .. } => 16,
            Self::CloneFailed { .. } => 17,
            Self::ConfigParse { .. } => 18,
            Self::CheckoutRequired { .. } => 19,
            Self::DownloadFailed { .. } => 20,
            Self::ExtractFailed { .. } => 21,
            _ => 1, // Generic unhandled error
        }
    }
}

impl From<std::io::Error> for RepoFetchError {
    fn from(source: std::io::Error) -> Self {
        // Used when a PathBuf is not readily available; prefer
        // RepoFetchError::io(path, source, file!(), line!()) when one is.
        Self::Io {
            path: PathBuf::new(),
            source,
            src_path: file!(),
            src_line: line!(),
        }
    }
}

impl From<serde_json::Error> for RepoFetchError {
    fn from(source: serde_json::Error) -> Self {
        Self::Internal {
            message: format!("JSON serialization/deserialization error: {}", source),
            src_path: file!(),
            src_line: line!(),
        }
    }
}

impl From<serde_yaml::Error> for RepoFetchError {
    fn from(source: serde_yaml::Error) -> Self {
        Self::ConfigParse {
            message: source.to_string(),
            source: Some(Box::new(source)),
            src_path: file!(),
            src_line: line!(),
        }
    }
}
