//! Dialect negotiation: try each query dialect until one yields a listing.

use picozen_core::{
    AttemptOutcome, Dialect, FetchedListing, HostAddress, NegotiationAttempt, normalize_path,
};
use tracing::{debug, info, warn};
use url::Url;

use super::RemoteClient;
use crate::error::{RemoteError, RemoteResult};
use crate::http::HttpBackend;
use crate::interpret::ParsedListing;
use crate::url::listing_url;

impl<B: HttpBackend> RemoteClient<B> {
    /// Fetch the listing of `path`, trying each configured dialect in turn.
    ///
    /// Attempts are strictly sequential and the first interpretable
    /// response wins. Every failure is recorded; only when all dialects
    /// fail is [`RemoteError::Exhausted`] returned.
    pub async fn negotiate(&self, host: &HostAddress, path: &str) -> RemoteResult<FetchedListing> {
        let path = normalize_path(path);
        let mut attempts = Vec::with_capacity(self.config.dialects.len());

        for dialect in &self.config.dialects {
            let url = listing_url(host, &path, dialect);

            match self.attempt(&url, &path).await {
                Ok(parsed) => {
                    info!(
                        url = %url,
                        dialect = %dialect,
                        format = %parsed.format,
                        entries = parsed.entries.len(),
                        "Listing negotiated"
                    );
                    attempts.push(record(
                        dialect,
                        &url,
                        AttemptOutcome::Success {
                            format: parsed.format,
                            entries: parsed.entries.len(),
                        },
                    ));
                    return Ok(FetchedListing {
                        entries: parsed.entries,
                        dialect: dialect.clone(),
                        format: parsed.format,
                        attempts,
                    });
                }
                Err(err) => {
                    let outcome = outcome_for(err);
                    debug!(url = %url, dialect = %dialect, outcome = %outcome, "Dialect attempt failed");
                    attempts.push(record(dialect, &url, outcome));
                }
            }
        }

        let last_error = attempts
            .last()
            .map_or_else(|| "no dialects configured".to_string(), |a| a.outcome.to_string());
        warn!(
            host = %host,
            path = %path,
            attempts = attempts.len(),
            last_error = %last_error,
            "All listing dialects failed"
        );

        Err(RemoteError::Exhausted {
            last_error,
            attempts,
        })
    }

    async fn attempt(&self, url: &Url, path: &str) -> RemoteResult<ParsedListing> {
        let timeout = self.config.timeout;
        let response = tokio::time::timeout(timeout, self.backend.get(url))
            .await
            .map_err(|_| RemoteError::Timeout { after: timeout })??;

        self.interpreter
            .interpret(&response.body, response.content_type.as_deref(), path)
    }
}

fn record(dialect: &Dialect, url: &Url, outcome: AttemptOutcome) -> NegotiationAttempt {
    NegotiationAttempt {
        dialect: dialect.clone(),
        url: url.to_string(),
        outcome,
    }
}

/// Classify a failed attempt.
fn outcome_for(err: RemoteError) -> AttemptOutcome {
    match err {
        RemoteError::HttpStatus { status, .. } => AttemptOutcome::HttpError { status },
        RemoteError::Timeout { after } => AttemptOutcome::Timeout { after },
        RemoteError::Uninterpretable { reason } => AttemptOutcome::ParseFailure { reason },
        RemoteError::Network(e) => AttemptOutcome::Network {
            message: e.to_string(),
        },
        RemoteError::Io(e) => AttemptOutcome::Network {
            message: e.to_string(),
        },
        other @ RemoteError::Exhausted { .. } => AttemptOutcome::Network {
            message: other.to_string(),
        },
    }
}
