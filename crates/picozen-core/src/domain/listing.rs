//! Listing results handed to the UI.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::dialect::Dialect;
use super::entry::Entry;
use super::path::{is_root, normalize_path, parent_path};

/// Response format a listing was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingFormat {
    /// `{ "dirs": [...], "files": [...] }` JSON object
    Json,
    /// Hyperlinked HTML directory index
    HtmlIndex,
}

impl fmt::Display for ListingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::HtmlIndex => f.write_str("html index"),
        }
    }
}

/// An ordered, immutable directory listing.
///
/// When the listed path is not the root, the first entry is the synthetic
/// back-entry pointing at the parent directory. A new `ListingResult` is
/// produced for every navigation; results are never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingResult {
    path: String,
    entries: Vec<Entry>,
    dialect: Dialect,
    format: ListingFormat,
}

impl ListingResult {
    /// Assemble a listing for `path` from the host's entries.
    ///
    /// Prepends the back-entry unless `path` is the root.
    pub fn assemble(path: &str, entries: Vec<Entry>, dialect: Dialect, format: ListingFormat) -> Self {
        let path = normalize_path(path);
        let mut ordered = Vec::with_capacity(entries.len() + 1);
        if !is_root(&path) {
            ordered.push(Entry::back_to(&parent_path(&path)));
        }
        ordered.extend(entries);

        Self {
            path,
            entries: ordered,
            dialect,
            format,
        }
    }

    /// The listed path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// All entries, back-entry first when present.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Consume the listing, returning its entries.
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    /// The dialect that produced this listing.
    pub const fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// The format this listing was parsed from.
    pub const fn format(&self) -> ListingFormat {
        self.format
    }

    /// The back-entry, if present.
    pub fn back_entry(&self) -> Option<&Entry> {
        self.entries.first().filter(|e| e.is_back())
    }

    /// Entries reported by the host, excluding the back-entry.
    pub fn host_entries(&self) -> &[Entry] {
        if self.back_entry().is_some() {
            &self.entries[1..]
        } else {
            &self.entries
        }
    }

    /// Number of entries, including the back-entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the listing has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
