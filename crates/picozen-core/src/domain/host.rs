//! Host address resolution.
//!
//! Turns whatever the user typed (an IP, a hostname with port, or a full
//! URL) into a validated base URL. Resolution is pure: no DNS, no sockets.

use std::fmt;

use thiserror::Error;
use url::Url;

use super::path::normalize_path;

/// Errors produced while resolving a host string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// Nothing was entered.
    #[error("Host cannot be empty")]
    Empty,

    /// The host string does not form a valid URL.
    #[error("Invalid host '{raw}': {reason}")]
    Malformed {
        /// The string as entered by the user
        raw: String,
        /// Why parsing failed
        reason: String,
    },

    /// A scheme other than http or https was given.
    #[error("Unsupported scheme '{scheme}' (only http and https are supported)")]
    UnsupportedScheme {
        /// The rejected scheme
        scheme: String,
    },
}

/// A validated base URL for a remote file server.
///
/// Always carries an `http` or `https` scheme and a host. Immutable once
/// constructed; changing hosts means resolving a new `HostAddress`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostAddress {
    raw: String,
    base: Url,
}

impl HostAddress {
    /// Resolve a user-supplied host string.
    ///
    /// Strings starting with `http://` or `https://` are parsed as-is,
    /// anything else is treated as `http://<raw>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use picozen_core::domain::HostAddress;
    ///
    /// let host = HostAddress::resolve("192.168.1.20:8080").unwrap();
    /// assert_eq!(host.base_url().as_str(), "http://192.168.1.20:8080/");
    ///
    /// let secure = HostAddress::resolve("https://files.example.com").unwrap();
    /// assert_eq!(secure.scheme(), "https");
    /// ```
    pub fn resolve(raw: &str) -> Result<Self, HostError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(HostError::Empty);
        }

        let candidate = if has_http_scheme(trimmed) {
            trimmed.to_string()
        } else if let Some((scheme, _)) = trimmed.split_once("://") {
            return Err(HostError::UnsupportedScheme {
                scheme: scheme.to_string(),
            });
        } else {
            format!("http://{trimmed}")
        };

        let base = Url::parse(&candidate).map_err(|e| HostError::Malformed {
            raw: trimmed.to_string(),
            reason: e.to_string(),
        })?;

        if base.host_str().is_none_or(str::is_empty) {
            return Err(HostError::Malformed {
                raw: trimmed.to_string(),
                reason: "missing host".to_string(),
            });
        }

        Ok(Self {
            raw: trimmed.to_string(),
            base,
        })
    }

    /// The host string as the user entered it (trimmed).
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The resolved base URL.
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    /// URL scheme, either `http` or `https`.
    pub fn scheme(&self) -> &str {
        self.base.scheme()
    }

    /// Build a URL for a remote path on this host.
    ///
    /// The pathname is replaced by the normalized `path`; any query or
    /// fragment carried by the base is dropped. Paths are decoded, so each
    /// segment is percent-encoded again (a literal `%` becomes `%25`).
    pub fn url_for(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);

        let normalized = normalize_path(path);
        if url.cannot_be_a_base() {
            url.set_path(&normalized);
        } else if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .clear()
                .extend(normalized.split('/').filter(|s| !s.is_empty()));
        }
        url
    }
}

impl fmt::Display for HostAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base.as_str())
    }
}

fn has_http_scheme(raw: &str) -> bool {
    let starts_with = |prefix: &str| {
        raw.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    };
    starts_with("http://") || starts_with("https://")
}
