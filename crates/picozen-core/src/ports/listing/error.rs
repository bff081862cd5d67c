//! Error types for listing operations.

use thiserror::Error;

use super::types::NegotiationAttempt;
use crate::domain::HostError;

/// Errors from listing operations.
///
/// Per-dialect failures never surface here on their own; they are collected
/// as [`NegotiationAttempt`]s and only become an error once every dialect has
/// been exhausted.
#[derive(Debug, Clone, Error)]
pub enum ListingError {
    /// The host string could not be resolved. No request was made.
    #[error(transparent)]
    InvalidHost(#[from] HostError),

    /// No host has been configured for the session.
    #[error("No host configured")]
    NoHost,

    /// Every dialect failed for this navigation.
    #[error("Could not connect to {host}: {last_error}")]
    ConnectionFailure {
        /// The host as entered by the user
        host: String,
        /// The path that was requested
        path: String,
        /// The last concrete error observed
        last_error: String,
        /// All attempts, in order
        attempts: Vec<NegotiationAttempt>,
    },

    /// A newer navigation replaced this one before it completed.
    #[error("Listing of {path} was superseded by a newer request")]
    Superseded {
        /// The path whose listing was discarded
        path: String,
    },
}

impl ListingError {
    /// Attempts made before the failure, if any.
    pub fn attempts(&self) -> &[NegotiationAttempt] {
        match self {
            Self::ConnectionFailure { attempts, .. } => attempts,
            _ => &[],
        }
    }

    /// Whether this error only means a newer request took over.
    pub const fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded { .. })
    }
}

/// Result type alias for listing operations.
pub type ListingOutcome<T> = Result<T, ListingError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Dialect;
    use crate::ports::listing::AttemptOutcome;

    #[test]
    fn test_connection_failure_display() {
        let err = ListingError::ConnectionFailure {
            host: "10.0.0.5".to_string(),
            path: "/apps".to_string(),
            last_error: "HTTP 500".to_string(),
            attempts: vec![NegotiationAttempt {
                dialect: Dialect::bare(),
                url: "http://10.0.0.5/apps".to_string(),
                outcome: AttemptOutcome::HttpError { status: 500 },
            }],
        };
        let msg = err.to_string();
        assert!(msg.contains("10.0.0.5"));
        assert!(msg.contains("HTTP 500"));
        assert_eq!(err.attempts().len(), 1);
    }

    #[test]
    fn test_invalid_host_is_transparent() {
        let err = ListingError::from(HostError::Empty);
        assert_eq!(err.to_string(), "Host cannot be empty");
        assert!(err.attempts().is_empty());
    }

    #[test]
    fn test_superseded() {
        let err = ListingError::Superseded {
            path: "/a".to_string(),
        };
        assert!(err.is_superseded());
        assert!(!ListingError::NoHost.is_superseded());
    }
}
