//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for browsing and downloading from a remote file
/// host (typically the sideloading server of a headset app).
#[derive(Parser)]
#[command(name = "picozen")]
#[command(about = "Browse and download files from a remote sideload host")]
#[command(version)]
pub struct Cli {
    /// Host to talk to (IP, hostname or URL); defaults to the saved host
    #[arg(long, global = true, env = "PICOZEN_HOST")]
    pub host: Option<String>,

    /// Per-attempt request timeout in seconds
    #[arg(long, global = true, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
