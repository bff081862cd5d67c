//! Internal error types for remote operations.
//!
//! These errors are internal to `picozen-remote` and are mapped to core port
//! errors at the boundary.

use std::time::Duration;

use picozen_core::NegotiationAttempt;
use thiserror::Error;

/// Result type alias for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Errors related to talking to a remote file host.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The host answered with a non-success status.
    #[error("Request failed with status {status}: {url}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// The request did not complete in time.
    #[error("Request timed out after {}s", after.as_secs_f32())]
    Timeout {
        /// The timeout that elapsed
        after: Duration,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response could not be interpreted as a listing.
    #[error("Unrecognized listing response: {reason}")]
    Uninterpretable {
        /// Why interpretation failed
        reason: String,
    },

    /// Every dialect failed.
    #[error("All {} listing attempts failed; last error: {last_error}", attempts.len())]
    Exhausted {
        /// Description of the last failure
        last_error: String,
        /// Every attempt, in order
        attempts: Vec<NegotiationAttempt>,
    },

    /// Writing a download to disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RemoteError {
    pub(crate) fn uninterpretable(reason: impl Into<String>) -> Self {
        Self::Uninterpretable {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picozen_core::{AttemptOutcome, Dialect};

    #[test]
    fn test_http_status_error_message() {
        let error = RemoteError::HttpStatus {
            status: 404,
            url: "http://10.0.0.5/apps?action=list".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("10.0.0.5"));
    }

    #[test]
    fn test_timeout_error_message() {
        let error = RemoteError::Timeout {
            after: Duration::from_millis(1500),
        };
        assert_eq!(error.to_string(), "Request timed out after 1.5s");
    }

    #[test]
    fn test_exhausted_error_message() {
        let error = RemoteError::Exhausted {
            last_error: "HTTP 500".to_string(),
            attempts: vec![NegotiationAttempt {
                dialect: Dialect::bare(),
                url: "http://h/".to_string(),
                outcome: AttemptOutcome::HttpError { status: 500 },
            }],
        };
        assert_eq!(
            error.to_string(),
            "All 1 listing attempts failed; last error: HTTP 500"
        );
    }
}
