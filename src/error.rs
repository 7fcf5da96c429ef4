//! Error types for lookout.
//!
//! Uses `thiserror` for ergonomic error definitions. Probe failures never
//! travel past the fan-out executor; they are folded into
//! [`ProbeOutcome::Error`](crate::probe::ProbeOutcome) values instead.

use std::path::PathBuf;
use thiserror::Error;

/// A target that failed normalization. The scan refuses to proceed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("empty {0} target")]
    Empty(&'static str),

    #[error("invalid username: {0}")]
    InvalidUsername(String),

    #[error("invalid email format: {0}")]
    InvalidEmail(String),

    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    #[error("invalid IPv4 address: {0}")]
    InvalidIp(String),

    #[error("phone number contains no digits: {0}")]
    InvalidPhone(String),

    #[error("file not found: {}", .0.display())]
    PhotoNotFound(PathBuf),

    #[error("unknown mode: {0}")]
    UnknownMode(String),
}

/// Failure of a single probe action.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("connection timed out")]
    Timeout,

    #[error("connection refused")]
    ConnectionRefused,

    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("DNS lookup failed: {0}")]
    Dns(String),

    #[error("TLS handshake failed: {0}")]
    Tls(String),

    #[error("certificate could not be parsed: {0}")]
    Certificate(String),

    #[error("metadata could not be read: {0}")]
    Metadata(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<trust_dns_resolver::error::ResolveError> for ProbeError {
    fn from(err: trust_dns_resolver::error::ResolveError) -> Self {
        Self::Dns(err.to_string())
    }
}

impl From<native_tls::Error> for ProbeError {
    fn from(err: native_tls::Error) -> Self {
        Self::Tls(err.to_string())
    }
}

/// Result type alias for probe actions.
pub type ProbeResultOf<T> = Result<T, ProbeError>;

/// Errors from result persistence.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to prepare directory: {0}")]
    DirectoryError(String),

    #[error("failed to save: {0}")]
    SaveFailed(String),

    #[error("failed to load: {0}")]
    LoadFailed(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors from settings, paths and catalogs.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine a home directory")]
    DirectoryNotFound,

    #[error("failed to read {}: {reason}", path.display())]
    ReadFailed { path: PathBuf, reason: String },

    #[error("failed to write {}: {reason}", path.display())]
    WriteFailed { path: PathBuf, reason: String },

    #[error("invalid configuration format: {0}")]
    InvalidFormat(String),

    #[error("invalid catalog table '{table}': {reason}")]
    InvalidCatalog { table: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level error for CLI commands.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for CLI commands.
pub type CliResult<T> = Result<T, CliError>;
