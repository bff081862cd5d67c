//! Query-parameter dialects spoken by remote file servers.
//!
//! Servers disagree on how a directory listing is requested. A dialect is
//! one combination of query parameters; negotiation tries them in order.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Query parameter that selects the operation in the action dialect family.
pub const ACTION_PARAM: &str = "action";

/// Action value requesting a directory listing.
pub const LIST_ACTION: &str = "list";

/// Action value requesting a file download.
pub const DOWNLOAD_ACTION: &str = "download";

/// One combination of query parameters used to request a listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dialect {
    params: Vec<(String, String)>,
}

impl Dialect {
    /// Create a dialect from key/value pairs.
    pub fn new<K, V>(params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            params: params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// `?action=list`
    pub fn action_list() -> Self {
        Self::new([(ACTION_PARAM, LIST_ACTION)])
    }

    /// `?list=1`
    pub fn list_flag() -> Self {
        Self::new([("list", "1")])
    }

    /// No parameters: a bare fetch of the path.
    pub const fn bare() -> Self {
        Self { params: Vec::new() }
    }

    /// The standard negotiation order.
    pub fn standard() -> Vec<Self> {
        vec![Self::action_list(), Self::list_flag(), Self::bare()]
    }

    /// Whether this dialect carries no parameters.
    pub fn is_bare(&self) -> bool {
        self.params.is_empty()
    }

    /// Replace the query of `url` with this dialect's parameters.
    pub fn apply(&self, url: &mut Url) {
        url.set_query(None);
        if self.params.is_empty() {
            return;
        }
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &self.params {
            pairs.append_pair(key, value);
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            return f.write_str("(no params)");
        }
        let joined = self
            .params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        f.write_str(&joined)
    }
}
