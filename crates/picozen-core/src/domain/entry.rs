//! Uniform listing entry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::path::normalize_path;

/// Name of the synthetic back-navigation entry.
///
/// Interpreters discard real entries carrying this name, so it never
/// collides with a file or directory on the host.
pub const BACK_ENTRY_NAME: &str = "../";

/// Kind of a listing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A directory that can be navigated into
    Directory,
    /// A file that can be downloaded
    File,
}

/// A single file or directory on a remote host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Directory or file
    pub kind: EntryKind,
    /// Display name
    pub name: String,
    /// Absolute, slash-normalized path on the host
    pub path: String,
    /// Size in bytes, 0 when unknown
    pub size: u64,
    /// Last modification time, if the host reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl Entry {
    /// Create a directory entry. The path is normalized.
    pub fn directory(name: impl Into<String>, path: &str) -> Self {
        Self {
            kind: EntryKind::Directory,
            name: name.into(),
            path: normalize_path(path),
            size: 0,
            modified_at: None,
        }
    }

    /// Create a file entry. The path is normalized.
    pub fn file(name: impl Into<String>, path: &str, size: u64) -> Self {
        Self {
            kind: EntryKind::File,
            name: name.into(),
            path: normalize_path(path),
            size,
            modified_at: None,
        }
    }

    /// Create the synthetic back-navigation entry pointing at `parent`.
    pub fn back_to(parent: &str) -> Self {
        Self::directory(BACK_ENTRY_NAME, parent)
    }

    /// Set the size.
    #[must_use]
    pub const fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Set the modification time.
    #[must_use]
    pub const fn with_modified(mut self, modified_at: Option<DateTime<Utc>>) -> Self {
        self.modified_at = modified_at;
        self
    }

    /// Whether this is a directory (including the back-entry).
    pub const fn is_directory(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }

    /// Whether this is a file.
    pub const fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File)
    }

    /// Whether this is the synthetic back-navigation entry.
    pub fn is_back(&self) -> bool {
        self.is_directory() && self.name == BACK_ENTRY_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_normalize_path() {
        let dir = Entry::directory("games", "//apps//games/");
        assert_eq!(dir.path, "/apps/games");
        assert!(dir.is_directory());
        assert_eq!(dir.size, 0);

        let file = Entry::file("b.apk", "x/b.apk", 2048);
        assert_eq!(file.path, "/x/b.apk");
        assert!(file.is_file());
        assert_eq!(file.size, 2048);
    }

    #[test]
    fn test_back_entry() {
        let back = Entry::back_to("/a/b");
        assert!(back.is_back());
        assert_eq!(back.name, BACK_ENTRY_NAME);
        assert_eq!(back.path, "/a/b");

        let named_like_back = Entry::file(BACK_ENTRY_NAME, "/x", 0);
        assert!(!named_like_back.is_back());
    }

    #[test]
    fn test_entry_serializes_kind_lowercase() {
        let json = serde_json::to_value(Entry::directory("a", "/a")).unwrap();
        assert_eq!(json["kind"], "directory");
        assert!(json.get("modified_at").is_none());
    }
}
