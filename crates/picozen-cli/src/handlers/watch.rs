//! `watch` command handler.
//!
//! Re-lists a directory on a fixed interval through the session's `tick`
//! and prints what changed. Ticks that fire while a listing is still in
//! flight are skipped, not queued.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Result;
use picozen_core::{Entry, ListingResult, normalize_path};
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::bootstrap::CliContext;
use crate::presentation::{bytes_readable, print_connection_failure, print_listing};

/// Watch `path` until Ctrl-C.
pub async fn execute(ctx: &CliContext, path: &str, interval_secs: u64) -> Result<()> {
    let host = super::require_host(ctx)?;
    let session = ctx.session();
    let target = normalize_path(path);

    let mut last = match session.list(&target).await {
        Ok(listing) => {
            print_listing(host.raw(), &listing, false);
            Some(listing)
        }
        Err(err) => {
            print_connection_failure(host.raw(), &err);
            None
        }
    };
    let mut failing = last.is_none();
    println!();
    println!("Watching every {interval_secs}s, Ctrl-C to stop.");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately
    interval.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            _ = interval.tick() => {}
        }

        // Until the first success the session still sits on its old path
        let outcome = if session.current_path() == target {
            session.tick().await
        } else {
            Some(session.list(&target).await)
        };

        match outcome {
            None => debug!(path = %target, "Refresh skipped"),
            Some(Ok(listing)) => {
                if failing {
                    println!("Reconnected to {}", host.raw());
                    failing = false;
                }
                if last.as_ref() != Some(&listing) {
                    let changes = match &last {
                        Some(previous) => describe_changes(previous, &listing),
                        None => Vec::new(),
                    };
                    print_changes(host.raw(), &listing, &changes);
                    last = Some(listing);
                }
            }
            Some(Err(err)) => {
                if !failing {
                    print_connection_failure(host.raw(), &err);
                    failing = true;
                }
            }
        }
    }

    println!();
    println!("Stopped watching {}{target}", host.raw());
    Ok(())
}

fn print_changes(host: &str, listing: &ListingResult, changes: &[String]) {
    println!();
    if changes.is_empty() {
        print_listing(host, listing, false);
        return;
    }
    println!("{}: {} change(s)", listing.path(), changes.len());
    for change in changes {
        println!("  {change}");
    }
}

/// Line-per-entry summary of what differs between two listings.
///
/// `+` added, `-` removed, `~` size or date changed. Entries are matched by
/// path; the back-entry is ignored.
pub fn describe_changes(previous: &ListingResult, current: &ListingResult) -> Vec<String> {
    let before: HashMap<&str, &Entry> = previous
        .host_entries()
        .iter()
        .map(|e| (e.path.as_str(), e))
        .collect();
    let after: HashMap<&str, &Entry> = current
        .host_entries()
        .iter()
        .map(|e| (e.path.as_str(), e))
        .collect();

    let mut changes = Vec::new();
    for entry in current.host_entries() {
        match before.get(entry.path.as_str()) {
            None => changes.push(format!("+ {}", label(entry))),
            Some(old) if old.size != entry.size || old.modified_at != entry.modified_at => {
                changes.push(format!(
                    "~ {} ({} -> {})",
                    label(entry),
                    bytes_readable(old.size),
                    bytes_readable(entry.size)
                ));
            }
            Some(_) => {}
        }
    }
    for entry in previous.host_entries() {
        if !after.contains_key(entry.path.as_str()) {
            changes.push(format!("- {}", label(entry)));
        }
    }
    changes
}

fn label(entry: &Entry) -> String {
    if entry.is_directory() {
        format!("{}/", entry.name)
    } else {
        entry.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picozen_core::{Dialect, ListingFormat};

    fn listing(entries: Vec<Entry>) -> ListingResult {
        ListingResult::assemble("/apps", entries, Dialect::action_list(), ListingFormat::Json)
    }

    #[test]
    fn test_no_changes() {
        let a = listing(vec![Entry::file("a.apk", "/apps/a.apk", 10)]);
        assert!(describe_changes(&a, &a.clone()).is_empty());
    }

    #[test]
    fn test_added_removed_and_changed() {
        let before = listing(vec![
            Entry::file("a.apk", "/apps/a.apk", 10),
            Entry::file("old.apk", "/apps/old.apk", 5),
        ]);
        let after = listing(vec![
            Entry::file("a.apk", "/apps/a.apk", 2048),
            Entry::directory("new", "/apps/new"),
        ]);

        let changes = describe_changes(&before, &after);
        assert_eq!(
            changes,
            vec![
                "~ a.apk (10 B -> 2 KB)".to_string(),
                "+ new/".to_string(),
                "- old.apk".to_string(),
            ]
        );
    }
}
