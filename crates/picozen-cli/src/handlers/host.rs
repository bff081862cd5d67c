//! `host` command handler.
//!
//! Manages the saved host in the data directory's `.env` file.

use anyhow::Result;
use picozen_core::{
    HostAddress, clear_persisted_host, env_file_path, persist_host, persisted_host,
};

use crate::error::CliError;
use crate::host_commands::HostCommand;
use crate::presentation::print_setup_instructions;

/// Execute a host subcommand.
pub fn execute(command: HostCommand) -> Result<()> {
    match command {
        HostCommand::Show => show(),
        HostCommand::Set { host } => set(&host),
        HostCommand::Clear => clear(),
    }
}

fn show() -> Result<()> {
    let env_path = env_file_path().map_err(CliError::from)?;
    match persisted_host().map_err(CliError::from)? {
        Some(host) => println!("Saved host: {host}"),
        None => {
            println!("No host saved.");
            println!();
            print_setup_instructions();
        }
    }
    println!();
    println!("Settings file: {}", env_path.display());
    Ok(())
}

fn set(raw: &str) -> Result<()> {
    // An empty value clears the saved host
    if raw.trim().is_empty() {
        return clear();
    }

    let host = HostAddress::resolve(raw).map_err(CliError::from)?;
    persist_host(host.raw()).map_err(CliError::from)?;

    println!("✓ Host set to {} ({host})", host.raw());
    println!("Browsing will start at /.");
    Ok(())
}

fn clear() -> Result<()> {
    if clear_persisted_host().map_err(CliError::from)? {
        println!("✓ Saved host cleared.");
    } else {
        println!("No host was saved.");
    }
    print_setup_instructions();
    Ok(())
}
