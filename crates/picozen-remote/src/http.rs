//! HTTP backend abstraction for remote file hosts.
//!
//! This module provides a trait-based HTTP backend so the negotiation loop
//! can be tested without a network. The production implementation uses
//! reqwest.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::config::{LISTING_ACCEPT, RemoteClientConfig};
use crate::error::{RemoteError, RemoteResult};

/// A successful (2xx) response body with its declared content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// `Content-Type` header, if the host sent one
    pub content_type: Option<String>,
    /// Response body decoded as text
    pub body: String,
}

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that can fetch listing pages.
///
/// Non-success statuses are reported as [`RemoteError::HttpStatus`], never
/// as a `RawResponse`.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// GET `url` and return its body.
    async fn get(&self, url: &Url) -> RemoteResult<RawResponse>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
    download_client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &RemoteClientConfig) -> RemoteResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;
        // Downloads can take far longer than a listing; no overall timeout.
        let download_client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            download_client,
            timeout: config.timeout,
        })
    }

    fn map_send_error(&self, err: reqwest::Error) -> RemoteError {
        if err.is_timeout() {
            RemoteError::Timeout {
                after: self.timeout,
            }
        } else {
            RemoteError::Network(err)
        }
    }

    fn check_status(response: &reqwest::Response, url: &Url) -> RemoteResult<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(RemoteError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            })
        }
    }

    /// Stream the body of `url` into `dest`, returning the bytes written.
    ///
    /// The body lands in a hidden `.part` file next to `dest` that is only
    /// renamed into place once the transfer completes; on any failure it is
    /// removed and `dest` is left untouched. Connecting and every read are
    /// bounded by the configured timeout, the transfer as a whole is not.
    pub async fn download_to(&self, url: &Url, dest: &Path) -> RemoteResult<u64> {
        let mut response = self
            .download_client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        Self::check_status(&response, url)?;

        let dir = dest
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        // Deleted on drop unless persisted
        let (std_file, part_path) = tempfile::Builder::new()
            .prefix(".picozen-")
            .suffix(".part")
            .tempfile_in(dir)?
            .into_parts();
        let mut file = tokio::fs::File::from_std(std_file);

        let mut written = 0u64;
        while let Some(chunk) = tokio::time::timeout(self.timeout, response.chunk())
            .await
            .map_err(|_| RemoteError::Timeout {
                after: self.timeout,
            })?
            .map_err(|e| self.map_send_error(e))?
        {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;
        drop(file);

        part_path.persist(dest).map_err(|e| e.error)?;
        Ok(written)
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get(&self, url: &Url) -> RemoteResult<RawResponse> {
        let response = self
            .client
            .get(url.as_str())
            .header(reqwest::header::ACCEPT, LISTING_ACCEPT)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        Self::check_status(&response, url)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Canned response for the fake backend.
    #[derive(Clone)]
    pub enum CannedResponse {
        /// 200 with `application/json`
        Json(String),
        /// 200 with `text/html`
        Html(String),
        /// 200 with the given content type (or none)
        Body {
            content_type: Option<String>,
            body: String,
        },
        /// Non-success status
        Status(u16),
        /// Connection refused
        Refused,
        /// Never answers
        Hang,
    }

    /// A fake HTTP backend that returns canned responses keyed by exact URL.
    ///
    /// Unknown URLs answer 404. Every request is recorded in order.
    #[derive(Default)]
    pub struct FakeBackend {
        responses: HashMap<String, CannedResponse>,
        requests: Arc<Mutex<Vec<String>>>,
    }

    impl FakeBackend {
        /// Create a new fake backend.
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a canned response for an exact URL.
        pub fn with_response(mut self, url: &str, response: CannedResponse) -> Self {
            self.responses.insert(url.to_string(), response);
            self
        }

        /// Handle to the request log, usable after the backend is moved.
        pub fn request_log(&self) -> Arc<Mutex<Vec<String>>> {
            Arc::clone(&self.requests)
        }
    }

    fn ok(content_type: Option<&str>, body: &str) -> RemoteResult<RawResponse> {
        Ok(RawResponse {
            status: 200,
            content_type: content_type.map(str::to_string),
            body: body.to_string(),
        })
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn get(&self, url: &Url) -> RemoteResult<RawResponse> {
            self.requests.lock().unwrap().push(url.to_string());

            match self.responses.get(url.as_str()).cloned() {
                Some(CannedResponse::Json(body)) => ok(Some("application/json"), &body),
                Some(CannedResponse::Html(body)) => ok(Some("text/html; charset=utf-8"), &body),
                Some(CannedResponse::Body { content_type, body }) => {
                    ok(content_type.as_deref(), &body)
                }
                Some(CannedResponse::Status(status)) => Err(RemoteError::HttpStatus {
                    status,
                    url: url.to_string(),
                }),
                Some(CannedResponse::Refused) => Err(RemoteError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                ))),
                Some(CannedResponse::Hang) => std::future::pending().await,
                None => Err(RemoteError::HttpStatus {
                    status: 404,
                    url: url.to_string(),
                }),
            }
        }
    }
}
