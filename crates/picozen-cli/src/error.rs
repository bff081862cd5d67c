//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from core and remote errors to exit codes.

use picozen_core::{HostError, ListingError, PathError};
use picozen_remote::RemoteError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The host string is not a valid address.
    #[error("Invalid host: {0}")]
    InvalidHost(String),

    /// A command needs a host and none was given or saved.
    #[error("No host configured. Pass --host <HOST> or run `picozen host set <HOST>`.")]
    NoHost,

    /// The remote path does not name a file.
    #[error("Not a file path: {0}")]
    InvalidPath(String),

    /// The host could not be reached or did not serve a listing.
    #[error("{0}")]
    Unreachable(String),

    /// A download failed.
    #[error("Download failed: {0}")]
    Download(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 64-78: Specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidHost(_) | Self::NoHost | Self::InvalidPath(_) => 64, // EX_USAGE
            Self::Unreachable(_) => 69,                // EX_UNAVAILABLE
            Self::Download(_) => 1,
            Self::Io(_) => 74,     // EX_IOERR
            Self::Config(_) => 78, // EX_CONFIG
        }
    }
}

impl From<HostError> for CliError {
    fn from(err: HostError) -> Self {
        Self::InvalidHost(err.to_string())
    }
}

impl From<ListingError> for CliError {
    fn from(err: ListingError) -> Self {
        match err {
            ListingError::InvalidHost(e) => Self::from(e),
            ListingError::NoHost => Self::NoHost,
            other @ (ListingError::ConnectionFailure { .. } | ListingError::Superseded { .. }) => {
                Self::Unreachable(other.to_string())
            }
        }
    }
}

impl From<RemoteError> for CliError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Io(e) => Self::Io(e.to_string()),
            other => Self::Download(other.to_string()),
        }
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
