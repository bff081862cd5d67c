//! Download link construction.

use url::Url;

use super::dialect::{ACTION_PARAM, DOWNLOAD_ACTION};
use super::entry::Entry;
use super::host::HostAddress;

/// Build the download URL for an entry on a host.
///
/// The pathname becomes the entry's path and `action=download` is
/// appended. Fetching the URL is left to the caller.
///
/// # Examples
///
/// ```
/// use picozen_core::domain::{Entry, HostAddress, build_download_url};
///
/// let host = HostAddress::resolve("10.0.0.5").unwrap();
/// let entry = Entry::file("b.apk", "/a/b.apk", 0);
/// assert_eq!(
///     build_download_url(&host, &entry).as_str(),
///     "http://10.0.0.5/a/b.apk?action=download"
/// );
/// ```
pub fn build_download_url(host: &HostAddress, entry: &Entry) -> Url {
    let mut url = host.url_for(&entry.path);
    url.query_pairs_mut()
        .append_pair(ACTION_PARAM, DOWNLOAD_ACTION);
    url
}
