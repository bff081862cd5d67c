//! Listing and diagnostics output.

use picozen_core::{Entry, ListingError, ListingResult};

use super::tables::{bytes_readable, format_modified, separator, truncate_string};

/// Print a listing as a table.
///
/// With `numbered`, every row is prefixed with the index used by the
/// interactive browser (the back-entry is `0` when present).
pub fn print_listing(host: &str, listing: &ListingResult, numbered: bool) {
    println!("{host}{}", listing.path());

    // Nothing at the root usually means the host is not serving yet
    if listing.is_empty() {
        println!();
        println!("  (empty directory)");
        println!();
        print_setup_instructions();
        return;
    }

    println!();
    for line in listing_lines(listing, numbered) {
        println!("{line}");
    }
}

/// Table lines for a non-empty listing, back-entry row included.
fn listing_lines(listing: &ListingResult, numbered: bool) -> Vec<String> {
    let prefix_header = if numbered { format!("{:>4} ", "#") } else { String::new() };
    let mut lines = vec![
        format!("{prefix_header}{:<40} {:<17} {:>10} Type", "Name", "Modified", "Size"),
        separator(if numbered { 80 } else { 75 }),
    ];

    for (index, entry) in listing.entries().iter().enumerate() {
        let prefix = if numbered { format!("{index:>4} ") } else { String::new() };
        lines.push(format!("{prefix}{}", format_row(entry)));
    }

    let entries = listing.host_entries();
    lines.push(String::new());
    if entries.is_empty() {
        lines.push("(empty directory)".to_string());
    } else {
        let files = entries.iter().filter(|e| e.is_file()).count();
        let dirs = entries.len() - files;
        lines.push(format!(
            "{dirs} director{}, {files} file(s)",
            if dirs == 1 { "y" } else { "ies" }
        ));
    }
    lines
}

fn format_row(entry: &Entry) -> String {
    if entry.is_back() {
        return format!("{:<40} {:<17} {:>10} dir", entry.name, "", "");
    }

    let name = if entry.is_directory() {
        format!("{}/", entry.name)
    } else {
        entry.name.clone()
    };
    let size = if entry.is_directory() && entry.size == 0 {
        "--".to_string()
    } else {
        bytes_readable(entry.size)
    };
    let kind = if entry.is_directory() { "dir" } else { "file" };

    format!(
        "{:<40} {:<17} {:>10} {kind}",
        truncate_string(&name, 40),
        format_modified(entry.modified_at),
        size
    )
}

/// Build the connection-failure diagnostics block.
pub fn connection_failure_message(host: &str, err: &ListingError) -> String {
    let last_error = match err {
        ListingError::ConnectionFailure { last_error, .. } => last_error.clone(),
        other => other.to_string(),
    };

    let mut message = format!(
        "Connection Failed\n\n\
         Could not connect to: {host}\n\n\
         Troubleshooting:\n\
         \u{2022} Make sure the PicoZen app is running on your headset\n\
         \u{2022} Check that sideloading is enabled in the app\n\
         \u{2022} Verify the IP address is correct\n\
         \u{2022} Ensure both devices are on the same network\n\n\
         Error: {last_error}"
    );

    let attempts = err.attempts();
    if !attempts.is_empty() {
        message.push_str("\n\nAttempts:");
        for attempt in attempts {
            message.push_str(&format!("\n  {} {}", attempt.url, attempt.outcome));
        }
    }

    message
}

/// Print the connection-failure diagnostics to stderr.
pub fn print_connection_failure(host: &str, err: &ListingError) {
    eprintln!("{}", connection_failure_message(host, err));
}

/// Print how to point picozen at a host.
pub fn print_setup_instructions() {
    println!("To browse a headset, start the PicoZen app, enable sideloading and");
    println!("note the address it shows. Then run:");
    println!();
    println!("  picozen host set <IP[:PORT]>");
    println!();
    println!("or pass --host <IP[:PORT]> to any command.");
}
