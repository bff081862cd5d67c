//! Listing source port trait.

use async_trait::async_trait;

use super::error::ListingOutcome;
use super::types::FetchedListing;
use crate::domain::HostAddress;

/// Port trait for fetching directory listings from a remote host.
///
/// The session uses this interface to obtain listings; the HTTP
/// implementation lives in `picozen-remote`.
///
/// # Design
///
/// - Uses core-owned DTOs, not HTTP types
/// - Returns `ListingError::ConnectionFailure` only after every dialect failed
/// - Implementations must try dialects sequentially and stop at the first
///   interpretable response
/// - Must be cancel-safe: the session may drop the future mid-negotiation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch the listing for `path` on `host`.
    ///
    /// # Arguments
    ///
    /// * `host` - Resolved host address
    /// * `path` - Normalized absolute remote path
    async fn fetch_listing(&self, host: &HostAddress, path: &str) -> ListingOutcome<FetchedListing>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    // Verify the trait is object-safe
    fn _assert_object_safe(_: Arc<dyn ListingSource>) {}
}
