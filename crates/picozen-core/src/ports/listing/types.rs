//! Core-owned DTOs for listing negotiation.
//!
//! These types cross the boundary between `picozen-remote` and the session.
//! They describe what happened during one negotiation without exposing
//! HTTP client details.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{Dialect, Entry, ListingFormat};

/// Outcome of a single dialect attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// The response was interpreted as a listing.
    Success {
        /// Format the listing was parsed from
        format: ListingFormat,
        /// Number of entries the host reported
        entries: usize,
    },
    /// The host answered with a non-success status.
    HttpError {
        /// HTTP status code
        status: u16,
    },
    /// No response within the per-attempt timeout.
    Timeout {
        /// The timeout that elapsed
        #[serde(with = "duration_millis")]
        after: Duration,
    },
    /// A response arrived but neither interpreter understood it.
    ParseFailure {
        /// Why interpretation failed
        reason: String,
    },
    /// The request never produced a response (refused, DNS, reset).
    Network {
        /// Transport error description
        message: String,
    },
}

impl AttemptOutcome {
    /// Whether this attempt produced a listing.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { format, entries } => write!(f, "{entries} entries ({format})"),
            Self::HttpError { status } => write!(f, "HTTP {status}"),
            Self::Timeout { after } => write!(f, "timed out after {}s", after.as_secs_f32()),
            Self::ParseFailure { reason } => write!(f, "unrecognized response: {reason}"),
            Self::Network { message } => write!(f, "network error: {message}"),
        }
    }
}

/// Record of one dialect attempt during a negotiation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationAttempt {
    /// The dialect that was tried
    pub dialect: Dialect,
    /// The exact URL requested
    pub url: String,
    /// What happened
    pub outcome: AttemptOutcome,
}

impl fmt::Display for NegotiationAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.dialect, self.outcome)
    }
}

/// A listing fetched from a host, before session assembly.
///
/// `entries` holds only what the host reported; the session adds the
/// back-entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedListing {
    /// Entries in host order
    pub entries: Vec<Entry>,
    /// The dialect that succeeded
    pub dialect: Dialect,
    /// Format of the successful response
    pub format: ListingFormat,
    /// Every attempt made, the successful one last
    pub attempts: Vec<NegotiationAttempt>,
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
