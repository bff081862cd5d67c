//! Port trait implementation for `RemoteClient`.
//!
//! This module implements the core-owned `ListingSource` trait for
//! `RemoteClient`, converting internal errors into `ListingError`.

use async_trait::async_trait;
use picozen_core::{FetchedListing, HostAddress, ListingError, ListingOutcome, ListingSource};

use crate::client::RemoteClient;
use crate::error::RemoteError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `RemoteError` to core `ListingError`.
fn map_error(err: RemoteError, host: &HostAddress, path: &str) -> ListingError {
    match err {
        RemoteError::Exhausted {
            last_error,
            attempts,
        } => ListingError::ConnectionFailure {
            host: host.raw().to_string(),
            path: path.to_string(),
            last_error,
            attempts,
        },
        other => ListingError::ConnectionFailure {
            host: host.raw().to_string(),
            path: path.to_string(),
            last_error: other.to_string(),
            attempts: Vec::new(),
        },
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend> ListingSource for RemoteClient<B> {
    async fn fetch_listing(&self, host: &HostAddress, path: &str) -> ListingOutcome<FetchedListing> {
        self.negotiate(host, path)
            .await
            .map_err(|e| map_error(e, host, path))
    }
}
