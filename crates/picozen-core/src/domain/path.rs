//! Remote path normalization.
//!
//! Remote paths are logical, slash-separated and always absolute. They never
//! touch the local filesystem, so these helpers work on plain strings.

/// Root path of every remote host.
pub const ROOT_PATH: &str = "/";

/// Normalize a remote path.
///
/// The result is absolute, has no duplicate or trailing slashes, and has
/// `.` and `..` segments resolved (`..` never climbs above the root).
/// An empty input normalizes to `/`.
///
/// # Examples
///
/// ```
/// use picozen_core::domain::normalize_path;
///
/// assert_eq!(normalize_path("//apps///games/"), "/apps/games");
/// assert_eq!(normalize_path(""), "/");
/// assert_eq!(normalize_path("a/./b/../c"), "/a/c");
/// ```
pub fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        ROOT_PATH.to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Join a child name onto a parent path and normalize the result.
pub fn join_path(parent: &str, name: &str) -> String {
    normalize_path(&format!("{parent}/{name}"))
}

/// Compute the parent of a path.
///
/// The final segment is removed; an empty remainder becomes `/`.
/// The parent of the root is the root.
pub fn parent_path(path: &str) -> String {
    let normalized = normalize_path(path);
    match normalized.rsplit_once('/') {
        Some((parent, _)) if !parent.is_empty() => parent.to_string(),
        _ => ROOT_PATH.to_string(),
    }
}

/// Whether a path denotes the root (`""` and `/` both do).
pub fn is_root(path: &str) -> bool {
    normalize_path(path) == ROOT_PATH
}
