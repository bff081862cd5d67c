//! Client for listing and downloading from remote file hosts.

mod negotiate;

use std::path::Path;
use std::sync::Arc;

use url::Url;

use crate::config::RemoteClientConfig;
use crate::error::RemoteResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::interpret::{ContentNegotiatingInterpreter, ResponseInterpreter};

// ============================================================================
// Type Aliases
// ============================================================================

/// Default remote client using the reqwest HTTP backend.
pub type DefaultRemoteClient = RemoteClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for talking to a remote file host.
///
/// This client is generic over an HTTP backend, allowing for easy testing.
/// Use `DefaultRemoteClient` for production code; the session reaches it
/// through the `ListingSource` port.
pub struct RemoteClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) config: RemoteClientConfig,
    pub(crate) interpreter: Arc<dyn ResponseInterpreter>,
}

impl DefaultRemoteClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &RemoteClientConfig) -> RemoteResult<Self> {
        let backend = ReqwestBackend::new(config)?;
        Ok(Self::with_backend(config.clone(), backend))
    }

    /// Download `url` into `dest`, returning the number of bytes written.
    pub async fn download_to(&self, url: &Url, dest: &Path) -> RemoteResult<u64> {
        tracing::debug!(url = %url, dest = %dest.display(), "Downloading");
        self.backend.download_to(url, dest).await
    }
}

impl<B: HttpBackend> RemoteClient<B> {
    /// Create a client over a custom backend.
    pub fn with_backend(config: RemoteClientConfig, backend: B) -> Self {
        Self {
            backend,
            config,
            interpreter: Arc::new(ContentNegotiatingInterpreter::new()),
        }
    }

    /// The configuration this client was built with.
    pub const fn config(&self) -> &RemoteClientConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::FakeBackend;
    use std::time::Duration;

    #[test]
    fn test_default_client_creation() {
        let client = DefaultRemoteClient::new(&RemoteClientConfig::new()).unwrap();
        assert_eq!(client.config().timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_client_with_fake_backend() {
        let config = RemoteClientConfig::new().with_timeout(Duration::from_millis(5));
        let client = RemoteClient::with_backend(config, FakeBackend::new());
        assert_eq!(client.config().timeout(), Duration::from_millis(5));
    }
}
