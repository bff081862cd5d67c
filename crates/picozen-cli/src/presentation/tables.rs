//! Table formatting utilities for CLI output.

use chrono::{DateTime, Local, Utc};

/// Unit suffixes for [`bytes_readable`], in steps of 1024.
const BYTE_UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB", "PB"];

/// Truncates a string to a maximum number of characters, adding "..." if
/// needed.
///
/// # Examples
///
/// ```rust
/// use picozen_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// assert_eq!(truncate_string("Hello World", 8), "Hello...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// A horizontal separator line.
pub fn separator(width: usize) -> String {
    "-".repeat(width)
}

/// Human-readable size: 1024-based units up to PB, at most two decimals.
///
/// ```rust
/// use picozen_cli::presentation::bytes_readable;
///
/// assert_eq!(bytes_readable(0), "0 B");
/// assert_eq!(bytes_readable(1536), "1.5 KB");
/// ```
pub fn bytes_readable(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64;
    let mut unit = BYTE_UNITS[0];
    for next in &BYTE_UNITS[1..] {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {unit}")
}

/// Format a modification time in local time, or `--` when unknown.
pub fn format_modified(modified: Option<DateTime<Utc>>) -> String {
    modified.map_or_else(
        || "--".to_string(),
        |m| m.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_no_truncation_needed() {
        assert_eq!(truncate_string("short", 10), "short");
    }

    #[test]
    fn test_truncate_string_exact_length() {
        assert_eq!(truncate_string("exactly10c", 10), "exactly10c");
    }

    #[test]
    fn test_truncate_string_needs_truncation() {
        assert_eq!(truncate_string("this is a very long string", 10), "this is...");
    }

    #[test]
    fn test_truncate_string_multibyte() {
        assert_eq!(truncate_string("ゲームファイル.apk", 6), "ゲーム...");
    }

    #[test]
    fn test_bytes_readable() {
        assert_eq!(bytes_readable(0), "0 B");
        assert_eq!(bytes_readable(1), "1 B");
        assert_eq!(bytes_readable(1023), "1023 B");
        assert_eq!(bytes_readable(1024), "1 KB");
        assert_eq!(bytes_readable(2048), "2 KB");
        assert_eq!(bytes_readable(1_234_567), "1.18 MB");
        assert_eq!(bytes_readable(5 * 1024 * 1024 * 1024), "5 GB");
        assert_eq!(bytes_readable(1024_u64.pow(5) * 3), "3 PB");
        assert_eq!(bytes_readable(1024_u64.pow(6)), "1024 PB");
    }

    #[test]
    fn test_format_modified_unknown() {
        assert_eq!(format_modified(None), "--");
    }

    #[test]
    fn test_format_modified_known() {
        let ts = DateTime::from_timestamp(1_709_294_400, 0).unwrap();
        let formatted = format_modified(Some(ts));
        assert_eq!(formatted.len(), "2024-03-01 12:00".len());
        assert!(formatted.starts_with("2024-0"));
    }
}
