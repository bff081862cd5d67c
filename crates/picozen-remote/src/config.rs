//! Public configuration for the remote client.

use std::time::Duration;

use picozen_core::Dialect;

/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// `Accept` header sent with listing requests.
pub const LISTING_ACCEPT: &str = "application/json, text/html;q=0.9, */*;q=0.8";

/// Configuration for the remote client.
///
/// # Example
///
/// ```
/// use picozen_remote::RemoteClientConfig;
/// use std::time::Duration;
///
/// let config = RemoteClientConfig::new()
///     .with_timeout(Duration::from_secs(3))
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct RemoteClientConfig {
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Per-attempt timeout
    pub(crate) timeout: Duration,
    /// Dialects to try, in order
    pub(crate) dialects: Vec<Dialect>,
}

impl Default for RemoteClientConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("picozen-remote/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: DEFAULT_TIMEOUT,
            dialects: Dialect::standard(),
        }
    }
}

impl RemoteClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the per-attempt timeout.
    ///
    /// Defaults to 10 seconds. A dialect that does not answer in time is
    /// recorded as timed out and the next one is tried.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the dialect fallback order.
    ///
    /// An empty list falls back to the standard dialects.
    #[must_use]
    pub fn with_dialects(mut self, dialects: Vec<Dialect>) -> Self {
        self.dialects = if dialects.is_empty() {
            Dialect::standard()
        } else {
            dialects
        };
        self
    }

    /// The configured per-attempt timeout.
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The configured dialect order.
    pub fn dialects(&self) -> &[Dialect] {
        &self.dialects
    }
}
