//! Listing source port definitions.
//!
//! This module defines the port trait and DTOs for fetching directory
//! listings. The HTTP implementation lives in `picozen-remote`.

mod error;
mod source;
mod types;

pub use error::{ListingError, ListingOutcome};
pub use source::ListingSource;
pub use types::{AttemptOutcome, FetchedListing, NegotiationAttempt};

#[cfg(test)]
pub use source::MockListingSource;
