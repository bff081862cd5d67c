//! Interactive `browse` command handler.
//!
//! Shows a numbered listing and reads commands until `q` or end of input.
//! Selecting a directory lists it; selecting a file downloads it into the
//! current directory.

use anyhow::Result;
use picozen_core::{
    ListingError, ListingOutcome, ListingResult, Navigation, clear_persisted_host, persist_host,
};
use tracing::warn;

use crate::bootstrap::CliContext;
use crate::presentation::{print_connection_failure, print_listing, print_setup_instructions};
use crate::utils::input::prompt_line;

/// One line of browser input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseAction {
    /// Open the entry at this index of the current listing
    Open(usize),
    /// Go to the parent directory
    Back,
    /// Re-list the current directory
    Refresh,
    /// Switch to another host (path resets to `/`)
    SetHost(String),
    /// Forget the host
    ClearHost,
    /// Show the command summary
    Help,
    /// Leave the browser
    Quit,
    /// Blank line
    Nothing,
    /// Anything else
    Unknown(String),
}

/// Parse one line of browser input.
pub fn parse_action(input: &str) -> BrowseAction {
    let input = input.trim();
    if let Ok(index) = input.parse::<usize>() {
        return BrowseAction::Open(index);
    }

    let (command, rest) = input
        .split_once(char::is_whitespace)
        .map_or((input, ""), |(c, r)| (c, r.trim()));

    match command.to_ascii_lowercase().as_str() {
        "" => BrowseAction::Nothing,
        ".." | "b" | "back" => BrowseAction::Back,
        "r" | "refresh" => BrowseAction::Refresh,
        "q" | "quit" | "exit" => BrowseAction::Quit,
        "h" | "?" | "help" => BrowseAction::Help,
        "host" if rest.is_empty() => BrowseAction::ClearHost,
        "host" => BrowseAction::SetHost(rest.to_string()),
        _ => BrowseAction::Unknown(input.to_string()),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  <n>          open entry n (directories are listed, files downloaded)");
    println!("  ..           go to the parent directory");
    println!("  r            refresh");
    println!("  host <HOST>  switch to another host");
    println!("  host         forget the saved host");
    println!("  q            quit");
}

/// Run the interactive browser starting at `start_path`.
pub async fn execute(ctx: &CliContext, start_path: &str) -> Result<()> {
    let session = ctx.session();

    if session.host().is_some() {
        show(ctx, session.list(start_path).await);
    } else {
        print_setup_instructions();
        println!();
        println!("Type `host <HOST>` to connect.");
    }

    while let Some(line) = prompt_line("picozen> ")? {
        match parse_action(&line) {
            BrowseAction::Quit => break,
            BrowseAction::Nothing => {}
            BrowseAction::Help => print_help(),
            BrowseAction::Unknown(input) => println!("Unknown command: {input} (type `help`)"),
            BrowseAction::Refresh => show(ctx, session.refresh().await),
            BrowseAction::Back => show(ctx, session.back().await),
            BrowseAction::Open(index) => open(ctx, index).await?,
            BrowseAction::SetHost(raw) => match session.set_host(&raw) {
                Ok(host) => {
                    if let Err(e) = persist_host(host.raw()) {
                        warn!(error = %e, "Could not save host preference");
                    }
                    show(ctx, session.list("/").await);
                }
                Err(err) => eprintln!("{err}"),
            },
            BrowseAction::ClearHost => {
                session.clear_host();
                if let Err(e) = clear_persisted_host() {
                    warn!(error = %e, "Could not clear host preference");
                }
                print_setup_instructions();
            }
        }
    }

    Ok(())
}

async fn open(ctx: &CliContext, index: usize) -> Result<()> {
    let session = ctx.session();
    let Some(listing) = session.last_listing() else {
        println!("Nothing listed yet.");
        return Ok(());
    };
    let Some(entry) = listing.entries().get(index) else {
        println!("No entry {index}; pick 0-{}.", listing.len().saturating_sub(1));
        return Ok(());
    };

    match session.navigate(entry).await {
        Ok(Navigation::Listed(listing)) => show(ctx, Ok(listing)),
        Ok(Navigation::Download { entry, url }) => {
            // A failed download should not end the browsing session
            if let Err(e) = super::get::download(ctx, &entry.name, &url, None, false).await {
                eprintln!("Failed to download {}: {e:#}", entry.name);
            }
        }
        Err(err) => show(ctx, Err(err)),
    }
    Ok(())
}

fn show(ctx: &CliContext, result: ListingOutcome<ListingResult>) {
    let host = ctx
        .session()
        .host()
        .map(|h| h.raw().to_string())
        .unwrap_or_default();

    match result {
        Ok(listing) => {
            println!();
            print_listing(&host, &listing, true);
        }
        Err(err) if err.is_superseded() => {}
        Err(ListingError::NoHost) => print_setup_instructions(),
        Err(err) => {
            print_connection_failure(&host, &err);
            if ctx.session().last_listing().is_some() {
                eprintln!();
                eprintln!("Still showing {}; type `r` to retry.", ctx.session().current_path());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_action("0"), BrowseAction::Open(0));
        assert_eq!(parse_action(" 12 "), BrowseAction::Open(12));
    }

    #[test]
    fn test_parse_navigation() {
        assert_eq!(parse_action(".."), BrowseAction::Back);
        assert_eq!(parse_action("back"), BrowseAction::Back);
        assert_eq!(parse_action("R"), BrowseAction::Refresh);
        assert_eq!(parse_action("q"), BrowseAction::Quit);
        assert_eq!(parse_action(""), BrowseAction::Nothing);
        assert_eq!(parse_action("help"), BrowseAction::Help);
    }

    #[test]
    fn test_parse_host() {
        assert_eq!(
            parse_action("host 192.168.1.20:8080"),
            BrowseAction::SetHost("192.168.1.20:8080".to_string())
        );
        assert_eq!(
            parse_action("host   http://quest.local  "),
            BrowseAction::SetHost("http://quest.local".to_string())
        );
        assert_eq!(parse_action("host"), BrowseAction::ClearHost);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse_action("-1"),
            BrowseAction::Unknown("-1".to_string())
        );
        assert_eq!(
            parse_action("cd apps"),
            BrowseAction::Unknown("cd apps".to_string())
        );
    }
}
