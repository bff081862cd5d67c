//! Main commands enum.
//!
//! This module defines the available commands for the CLI tool.

use std::path::PathBuf;

use clap::Subcommand;

use crate::host_commands::HostCommand;

/// Available commands.
///
/// Remote paths are absolute (`/apps/games`); relative paths are taken
/// from the root.
#[derive(Subcommand)]
pub enum Commands {
    /// List a remote directory
    Ls {
        /// Remote directory to list
        #[arg(default_value = "/")]
        path: String,
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactively browse the remote host
    Browse {
        /// Directory to start in
        #[arg(default_value = "/")]
        path: String,
    },

    /// Download a remote file
    Get {
        /// Remote file path
        path: String,
        /// Where to save the file (defaults to its name in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Overwrite an existing file without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Print the download URL of a remote file
    Url {
        /// Remote file path
        path: String,
    },

    /// Re-list a directory periodically and print changes
    Watch {
        /// Remote directory to watch
        #[arg(default_value = "/")]
        path: String,
        /// Seconds between refreshes
        #[arg(short, long, default_value = "5", value_parser = clap::value_parser!(u64).range(1..))]
        interval: u64,
    },

    /// Show or change the saved host
    Host {
        #[command(subcommand)]
        command: HostCommand,
    },
}
