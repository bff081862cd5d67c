//! Host preference subcommands.

use clap::Subcommand;

/// Saved host management commands.
#[derive(Subcommand)]
pub enum HostCommand {
    /// Show the saved host and where it is stored
    Show,
    /// Validate and save a host for later runs
    Set {
        /// IP, hostname or URL of the host (e.g. 192.168.1.20:8080)
        host: String,
    },
    /// Forget the saved host
    Clear,
}
