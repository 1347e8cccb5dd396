//! Error types for Depot Downloader
//!
//! This module defines the error types for every stage of a launch: argument
//! validation, authentication, persistent store handling and the download
//! collaborator. Validation and authentication errors are turned into
//! printed messages and exit codes by the CLI layer; declared download
//! errors are caught at the dispatch boundary; everything else propagates.

use std::path::PathBuf;
use thiserror::Error;

/// Argument and configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required argument was not supplied
    #[error("{flag} not specified!")]
    MissingArgument { flag: &'static str },

    /// Two arguments that cannot be combined were both supplied
    #[error("{first} cannot be combined with {second}")]
    Conflict {
        first: &'static str,
        second: &'static str,
    },

    /// Manifest ids were given but do not pair up with the depot ids
    #[error("-manifest requires one id for every -depot specified ({depots} depots, {manifests} manifests)")]
    ManifestCountMismatch { depots: usize, manifests: usize },

    /// Invalid argument value
    #[error("Invalid value for {flag}: {value}. {reason}")]
    InvalidValue {
        flag: &'static str,
        value: String,
        reason: String,
    },

    /// Argument vector rejected by the parser (unknown flag, bad number, ...)
    #[error("{0}")]
    InvalidArguments(String),

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),
}

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// The session initialiser rejected the login
    #[error("Failed to initialise the content session")]
    LoginFailed,

    /// Input ended before a password was entered
    #[error("No password available for account \"{username}\": input closed")]
    PasswordUnavailable { username: String },

    /// Reading the password failed
    #[error("Failed to read password")]
    PasswordInput(#[from] std::io::Error),
}

/// Persistent store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store was loaded twice without an intervening reset
    #[error("{kind} store is already loaded")]
    AlreadyLoaded { kind: &'static str },

    /// The store was used before it was loaded
    #[error("{kind} store was used before it was loaded")]
    NotLoaded { kind: &'static str },

    /// File I/O error while reading or writing the store
    #[error("I/O error on {kind} store {path}: {source}")]
    Io {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored mapping could not be encoded or decoded
    #[error("Corrupt {kind} store {path}: {source}")]
    Encoding {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors reported by the content download collaborator
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Known content failure (missing depot, access denied, ...)
    #[error("{0}")]
    Content(String),

    /// The user cancelled the operation
    #[error("Operation was cancelled")]
    Cancelled,

    /// Anything the collaborator did not classify
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl DownloadError {
    /// Create a declared content error with a message
    pub fn content(message: impl Into<String>) -> Self {
        Self::Content(message.into())
    }

    /// Whether this failure is an expected outcome handled at the dispatch boundary
    pub fn is_declared(&self) -> bool {
        matches!(self, DownloadError::Content(_) | DownloadError::Cancelled)
    }
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Authentication error
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Store error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Download error
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Whether the error is a declared, reportable outcome rather than a fault
    pub fn is_declared(&self) -> bool {
        match self {
            AppError::Config(_) | AppError::Auth(_) => true,
            AppError::Download(e) => e.is_declared(),
            AppError::Store(_) | AppError::Io(_) => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::Auth(_) => "authentication",
            AppError::Store(_) => "store",
            AppError::Download(_) => "download",
            AppError::Io(_) => "io",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Authentication result type alias
pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Store result type alias
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Download result type alias
pub type DownloadResult<T> = std::result::Result<T, DownloadError>;

impl From<clap::Error> for ConfigError {
    fn from(error: clap::Error) -> Self {
        let rendered = error.to_string();
        let first_line = rendered.lines().next().unwrap_or_default();
        ConfigError::InvalidArguments(
            first_line
                .trim_start_matches("error: ")
                .trim()
                .to_string(),
        )
    }
}
