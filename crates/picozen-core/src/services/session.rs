//! Listing session - owns the host, the current path and connectivity state.
//!
//! The session is the only stateful piece of the listing flow. Every call to
//! [`ListingSession::list`] produces a fresh [`ListingResult`] or a typed
//! failure; a failed or superseded call never moves the current path.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::{
    Entry, HostAddress, ListingResult, ROOT_PATH, build_download_url, normalize_path, parent_path,
};
use crate::ports::{ListingError, ListingOutcome, ListingSource};

/// Lifecycle state of a session.
///
/// `Idle -> Listing -> {Ready, Failed}`; `Listing` is re-entered on every
/// navigation, and a host change returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No listing has been requested since the host was set
    Idle,
    /// A negotiation is in flight
    Listing,
    /// The last listing succeeded
    Ready,
    /// The last listing failed
    Failed,
}

/// What navigating to an entry resulted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// A directory was listed and became the current path.
    Listed(ListingResult),
    /// A file was selected; the caller should fetch this URL.
    Download {
        /// The selected file
        entry: Entry,
        /// Absolute download URL
        url: Url,
    },
}

struct SessionInner {
    host: Option<HostAddress>,
    current_path: String,
    state: SessionState,
    is_connected: bool,
    last_listing: Option<ListingResult>,
    last_error: Option<String>,
    generation: u64,
    cancel: CancellationToken,
}

/// A browsing session against one remote host at a time.
///
/// At most one negotiation is applied at a time: starting a new listing
/// cancels the one in flight, and only the result of the latest request
/// ever updates the session.
pub struct ListingSession {
    source: Arc<dyn ListingSource>,
    inner: Mutex<SessionInner>,
    in_flight: Arc<AtomicUsize>,
}

/// Decrements the in-flight counter when a listing finishes or is dropped.
struct InFlightGuard(Arc<AtomicUsize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ListingSession {
    /// Create a session with no host configured.
    pub fn new(source: Arc<dyn ListingSource>) -> Self {
        Self {
            source,
            inner: Mutex::new(SessionInner {
                host: None,
                current_path: ROOT_PATH.to_string(),
                state: SessionState::Idle,
                is_connected: false,
                last_listing: None,
                last_error: None,
                generation: 0,
                cancel: CancellationToken::new(),
            }),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a session already pointed at `host`.
    pub fn with_host(source: Arc<dyn ListingSource>, host: HostAddress) -> Self {
        let session = Self::new(source);
        session.lock().host = Some(host);
        session
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Switch to a new host.
    ///
    /// The host string is resolved first; an invalid host leaves the session
    /// untouched. On success the current path resets to `/`, any in-flight
    /// listing is superseded and the state returns to `Idle`.
    pub fn set_host(&self, raw: &str) -> ListingOutcome<HostAddress> {
        let host = HostAddress::resolve(raw)?;

        let mut inner = self.lock();
        inner.cancel.cancel();
        inner.cancel = CancellationToken::new();
        inner.generation += 1;
        inner.host = Some(host.clone());
        inner.current_path = ROOT_PATH.to_string();
        inner.state = SessionState::Idle;
        inner.is_connected = false;
        inner.last_listing = None;
        inner.last_error = None;

        info!(host = %host, "Host changed");
        Ok(host)
    }

    /// Forget the configured host.
    pub fn clear_host(&self) {
        let mut inner = self.lock();
        inner.cancel.cancel();
        inner.cancel = CancellationToken::new();
        inner.generation += 1;
        inner.host = None;
        inner.current_path = ROOT_PATH.to_string();
        inner.state = SessionState::Idle;
        inner.is_connected = false;
        inner.last_listing = None;
        inner.last_error = None;
    }

    /// List `path` on the current host.
    ///
    /// On success `path` becomes the current path and the listing is
    /// returned with a back-entry prepended (unless at the root). On failure
    /// the current path and the previous listing are kept.
    pub async fn list(&self, path: &str) -> ListingOutcome<ListingResult> {
        let path = normalize_path(path);

        let (host, token, generation, _guard) = {
            let mut inner = self.lock();
            let host = inner.host.clone().ok_or(ListingError::NoHost)?;

            inner.cancel.cancel();
            inner.cancel = CancellationToken::new();
            inner.generation += 1;
            inner.state = SessionState::Listing;

            self.in_flight.fetch_add(1, Ordering::SeqCst);
            let guard = InFlightGuard(Arc::clone(&self.in_flight));
            (host, inner.cancel.clone(), inner.generation, guard)
        };

        debug!(host = %host, path = %path, generation, "Listing started");

        let fetched = tokio::select! {
            biased;
            () = token.cancelled() => None,
            result = self.source.fetch_listing(&host, &path) => Some(result),
        };

        let mut inner = self.lock();
        let Some(fetched) = fetched.filter(|_| inner.generation == generation) else {
            debug!(path = %path, generation, "Discarding superseded listing");
            return Err(ListingError::Superseded { path });
        };

        match fetched {
            Ok(fetched) => {
                let listing =
                    ListingResult::assemble(&path, fetched.entries, fetched.dialect, fetched.format);
                inner.current_path = path;
                inner.state = SessionState::Ready;
                inner.is_connected = true;
                inner.last_error = None;
                inner.last_listing = Some(listing.clone());
                Ok(listing)
            }
            Err(err) => {
                warn!(host = %host, path = %path, error = %err, "Listing failed");
                inner.state = SessionState::Failed;
                inner.is_connected = false;
                inner.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Re-list the current path.
    pub async fn refresh(&self) -> ListingOutcome<ListingResult> {
        let path = self.current_path();
        self.list(&path).await
    }

    /// List the parent of the current path.
    pub async fn back(&self) -> ListingOutcome<ListingResult> {
        let parent = parent_path(&self.current_path());
        self.list(&parent).await
    }

    /// Periodic refresh hook.
    ///
    /// Returns `None` without doing anything when a listing is already in
    /// flight or no host is configured; ticks are skipped, never queued.
    pub async fn tick(&self) -> Option<ListingOutcome<ListingResult>> {
        {
            let inner = self.lock();
            if inner.host.is_none() {
                return None;
            }
            if self.in_flight.load(Ordering::SeqCst) > 0 {
                debug!(path = %inner.current_path, "Skipping refresh tick, listing in flight");
                return None;
            }
        }
        Some(self.refresh().await)
    }

    /// Act on an entry.
    ///
    /// Directories are listed; files are not fetched, the download URL is
    /// returned instead.
    pub async fn navigate(&self, entry: &Entry) -> ListingOutcome<Navigation> {
        if entry.is_directory() {
            return self.list(&entry.path).await.map(Navigation::Listed);
        }

        let host = self.host().ok_or(ListingError::NoHost)?;
        Ok(Navigation::Download {
            entry: entry.clone(),
            url: build_download_url(&host, entry),
        })
    }

    /// Download URL for an entry on the current host.
    pub fn download_url(&self, entry: &Entry) -> ListingOutcome<Url> {
        let host = self.host().ok_or(ListingError::NoHost)?;
        Ok(build_download_url(&host, entry))
    }

    /// The configured host, if any.
    pub fn host(&self) -> Option<HostAddress> {
        self.lock().host.clone()
    }

    /// The path of the last successful listing (`/` initially).
    pub fn current_path(&self) -> String {
        self.lock().current_path.clone()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.lock().state
    }

    /// Whether the last listing succeeded.
    pub fn is_connected(&self) -> bool {
        self.lock().is_connected
    }

    /// Whether a listing is currently in flight.
    pub fn is_listing(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// The last successful listing, kept across failures.
    pub fn last_listing(&self) -> Option<ListingResult> {
        self.lock().last_listing.clone()
    }

    /// Message of the last failure, cleared by the next success.
    pub fn last_error(&self) -> Option<String> {
        self.lock().last_error.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Dialect, ListingFormat};
    use crate::ports::listing::MockListingSource;
    use crate::ports::{AttemptOutcome, FetchedListing, NegotiationAttempt};
    use async_trait::async_trait;
    use std::time::Duration;

    fn fetched(entries: Vec<Entry>) -> FetchedListing {
        FetchedListing {
            entries,
            dialect: Dialect::action_list(),
            format: ListingFormat::Json,
            attempts: Vec::new(),
        }
    }

    fn connection_failure(path: &str) -> ListingError {
        ListingError::ConnectionFailure {
            host: "10.0.0.5".to_string(),
            path: path.to_string(),
            last_error: "timed out after 10s".to_string(),
            attempts: vec![NegotiationAttempt {
                dialect: Dialect::bare(),
                url: format!("http://10.0.0.5{path}"),
                outcome: AttemptOutcome::Timeout {
                    after: Duration::from_secs(10),
                },
            }],
        }
    }

    fn session_with(mock: MockListingSource) -> ListingSession {
        let host = HostAddress::resolve("10.0.0.5").unwrap();
        ListingSession::with_host(Arc::new(mock), host)
    }

    /// Source that answers slowly for paths starting with `/slow`.
    struct DelayedSource;

    #[async_trait]
    impl ListingSource for DelayedSource {
        async fn fetch_listing(
            &self,
            _host: &HostAddress,
            path: &str,
        ) -> ListingOutcome<FetchedListing> {
            if path.starts_with("/slow") {
                tokio::time::sleep(Duration::from_millis(300)).await;
            }
            Ok(fetched(vec![Entry::file("f.apk", &format!("{path}/f.apk"), 1)]))
        }
    }

    #[tokio::test]
    async fn test_list_prepends_back_entry() {
        let mut mock = MockListingSource::new();
        mock.expect_fetch_listing()
            .withf(|_, path| path == "/x")
            .times(1)
            .returning(|_, _| {
                Ok(fetched(vec![
                    Entry::directory("a", "/x/a"),
                    Entry::file("b.apk", "/x/b.apk", 2048),
                ]))
            });

        let session = session_with(mock);
        let listing = session.list("/x").await.unwrap();

        let entries = listing.entries();
        assert_eq!(entries.len(), 3);
        assert!(entries[0].is_back());
        assert_eq!(entries[0].path, "/");
        assert_eq!(entries[1].path, "/x/a");
        assert_eq!(entries[2].size, 2048);

        assert_eq!(session.current_path(), "/x");
        assert_eq!(session.state(), SessionState::Ready);
        assert!(session.is_connected());
    }

    #[tokio::test]
    async fn test_list_normalizes_requested_path() {
        let mut mock = MockListingSource::new();
        mock.expect_fetch_listing()
            .withf(|_, path| path == "/a/b")
            .returning(|_, _| Ok(fetched(Vec::new())));

        let session = session_with(mock);
        let listing = session.list("//a//b/").await.unwrap();
        assert_eq!(listing.path(), "/a/b");
        assert_eq!(listing.back_entry().unwrap().path, "/a");
    }

    #[tokio::test]
    async fn test_failure_keeps_path_and_previous_listing() {
        let mut mock = MockListingSource::new();
        mock.expect_fetch_listing()
            .withf(|_, path| path == "/apps")
            .returning(|_, _| Ok(fetched(vec![Entry::directory("games", "/apps/games")])));
        mock.expect_fetch_listing()
            .withf(|_, path| path == "/apps/games")
            .returning(|_, path| Err(connection_failure(path)));

        let session = session_with(mock);
        session.list("/apps").await.unwrap();

        let err = session.list("/apps/games").await.unwrap_err();
        assert!(matches!(err, ListingError::ConnectionFailure { .. }));
        assert_eq!(err.attempts().len(), 1);

        assert_eq!(session.current_path(), "/apps");
        assert_eq!(session.state(), SessionState::Failed);
        assert!(!session.is_connected());
        assert_eq!(session.last_listing().unwrap().path(), "/apps");
        assert!(session.last_error().unwrap().contains("10.0.0.5"));
    }

    #[tokio::test]
    async fn test_list_without_host_fails() {
        let session = ListingSession::new(Arc::new(MockListingSource::new()));
        assert!(matches!(session.list("/").await, Err(ListingError::NoHost)));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_set_host_resets_path() {
        let mut mock = MockListingSource::new();
        mock.expect_fetch_listing()
            .returning(|_, _| Ok(fetched(Vec::new())));

        let session = session_with(mock);
        session.list("/deep/path").await.unwrap();
        assert_eq!(session.current_path(), "/deep/path");

        let host = tokio_test::assert_ok!(session.set_host("https://other.local"));
        assert_eq!(host.scheme(), "https");
        assert_eq!(session.current_path(), "/");
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.last_listing().is_none());
    }

    #[tokio::test]
    async fn test_invalid_host_leaves_session_untouched() {
        let mut mock = MockListingSource::new();
        mock.expect_fetch_listing()
            .returning(|_, _| Ok(fetched(Vec::new())));

        let session = session_with(mock);
        session.list("/keep").await.unwrap();

        let err = tokio_test::assert_err!(session.set_host("bad host"));
        assert!(matches!(err, ListingError::InvalidHost(_)));
        assert_eq!(session.current_path(), "/keep");
        assert_eq!(session.host().unwrap().raw(), "10.0.0.5");
    }

    #[tokio::test]
    async fn test_navigate_directory_lists_it() {
        let mut mock = MockListingSource::new();
        mock.expect_fetch_listing()
            .withf(|_, path| path == "/apps")
            .returning(|_, _| Ok(fetched(Vec::new())));

        let session = session_with(mock);
        let nav = session
            .navigate(&Entry::directory("apps", "/apps"))
            .await
            .unwrap();

        assert!(matches!(nav, Navigation::Listed(ref l) if l.path() == "/apps"));
        assert_eq!(session.current_path(), "/apps");
    }

    #[tokio::test]
    async fn test_navigate_back_entry() {
        let mut mock = MockListingSource::new();
        mock.expect_fetch_listing()
            .returning(|_, _| Ok(fetched(Vec::new())));

        let session = session_with(mock);
        let listing = session.list("/a/b/c").await.unwrap();
        let back = listing.back_entry().unwrap().clone();

        session.navigate(&back).await.unwrap();
        assert_eq!(session.current_path(), "/a/b");

        session.back().await.unwrap();
        assert_eq!(session.current_path(), "/a");
        session.back().await.unwrap();
        assert_eq!(session.current_path(), "/");
    }

    #[tokio::test]
    async fn test_navigate_file_does_not_fetch() {
        let mut mock = MockListingSource::new();
        mock.expect_fetch_listing().times(0);

        let session = session_with(mock);
        let entry = Entry::file("b.apk", "/a/b.apk", 10);
        let nav = session.navigate(&entry).await.unwrap();

        match nav {
            Navigation::Download { entry: e, url } => {
                assert_eq!(e.name, "b.apk");
                assert_eq!(url.as_str(), "http://10.0.0.5/a/b.apk?action=download");
            }
            Navigation::Listed(_) => panic!("file navigation must not list"),
        }
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_newer_listing_supersedes_older() {
        let session = Arc::new(ListingSession::with_host(
            Arc::new(DelayedSource),
            HostAddress::resolve("10.0.0.5").unwrap(),
        ));

        let slow = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.list("/slow").await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(session.is_listing());

        let fast = session.list("/fast").await.unwrap();
        assert_eq!(fast.path(), "/fast");

        let slow_result = slow.await.unwrap();
        assert!(matches!(slow_result, Err(ListingError::Superseded { ref path }) if path == "/slow"));
        assert_eq!(session.current_path(), "/fast");
        assert_eq!(session.last_listing().unwrap().path(), "/fast");
        assert!(!session.is_listing());
    }

    #[tokio::test]
    async fn test_host_change_supersedes_in_flight_listing() {
        let session = Arc::new(ListingSession::with_host(
            Arc::new(DelayedSource),
            HostAddress::resolve("10.0.0.5").unwrap(),
        ));

        let slow = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.list("/slow").await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        session.set_host("10.0.0.6").unwrap();

        assert!(slow.await.unwrap().unwrap_err().is_superseded());
        assert_eq!(session.current_path(), "/");
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_tick_skips_while_listing_in_flight() {
        let session = Arc::new(ListingSession::with_host(
            Arc::new(DelayedSource),
            HostAddress::resolve("10.0.0.5").unwrap(),
        ));

        let slow = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.list("/slow").await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(session.tick().await.is_none());

        slow.await.unwrap().unwrap();
        assert_eq!(session.current_path(), "/slow");

        let refreshed = session.tick().await.unwrap().unwrap();
        assert_eq!(refreshed.path(), "/slow");
    }

    #[tokio::test]
    async fn test_tick_without_host_is_noop() {
        let session = ListingSession::new(Arc::new(MockListingSource::new()));
        assert!(session.tick().await.is_none());
    }

    #[tokio::test]
    async fn test_each_listing_is_independent() {
        let mut mock = MockListingSource::new();
        mock.expect_fetch_listing()
            .returning(|_, _| Ok(fetched(vec![Entry::file("a.apk", "/a.apk", 1)])));

        let session = session_with(mock);
        let mut first = session.list("/").await.unwrap().into_entries();
        first[0].name = "mutated".to_string();

        let second = session.list("/").await.unwrap();
        assert_eq!(second.entries()[0].name, "a.apk");
    }
}
