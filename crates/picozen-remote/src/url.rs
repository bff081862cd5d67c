//! URL construction helpers for listing requests and index links.

use picozen_core::{Dialect, HostAddress, join_path, normalize_path};
use url::Url;

/// Build the request URL for one dialect attempt.
///
/// The path is normalized and any query on the host is replaced by the
/// dialect's parameters.
pub fn listing_url(host: &HostAddress, path: &str, dialect: &Dialect) -> Url {
    let mut url = host.url_for(path);
    dialect.apply(&mut url);
    url
}

/// Whether an index link points somewhere else entirely.
///
/// Anything with a scheme (`http:`, `mailto:`) or a network-path reference
/// (`//cdn/x`) is absolute; everything else resolves against the host.
pub fn is_absolute_href(href: &str) -> bool {
    href.starts_with("//") || Url::parse(href).is_ok()
}

/// Strip the query and fragment from an index link.
pub fn strip_query(href: &str) -> &str {
    let end = href.find(['?', '#']).unwrap_or(href.len());
    &href[..end]
}

/// Resolve a decoded relative link against the listed directory.
///
/// Root-relative targets are used as-is; everything else is joined onto
/// `current`. The result is normalized.
pub fn resolve_href(current: &str, target: &str) -> String {
    if target.starts_with('/') {
        normalize_path(target)
    } else {
        join_path(current, target)
    }
}
