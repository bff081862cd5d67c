//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Remote client (via picozen-remote)
//! - Listing session (via picozen-core)
//!
//! Command handlers receive the composed `CliContext`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use picozen_core::{HostAddress, ListingSession};
use picozen_remote::{DEFAULT_TIMEOUT, DefaultRemoteClient, RemoteClientConfig};

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Host from `--host` or the saved preference.
    pub host: Option<String>,
    /// Per-attempt request timeout.
    pub timeout: Duration,
}

impl CliConfig {
    /// Build the configuration from parsed arguments.
    ///
    /// Blank host strings count as "no host".
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            host: cli
                .host
                .as_deref()
                .map(str::trim)
                .filter(|h| !h.is_empty())
                .map(str::to_string),
            timeout: cli.timeout.map_or(DEFAULT_TIMEOUT, Duration::from_secs),
        }
    }
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// Remote client, shared with the session.
    pub client: Arc<DefaultRemoteClient>,
    /// The browsing session.
    pub session: ListingSession,
}

impl CliContext {
    /// Access the listing session.
    pub const fn session(&self) -> &ListingSession {
        &self.session
    }

    /// Access the remote client (for downloads).
    pub fn client(&self) -> &DefaultRemoteClient {
        &self.client
    }

    /// The configured host, or an error telling the user how to set one.
    pub fn require_host(&self) -> Result<HostAddress, CliError> {
        self.session.host().ok_or(CliError::NoHost)
    }
}

/// Bootstrap the CLI application.
///
/// Builds the remote client and a session pointed at the configured host.
/// An invalid host is reported here, before any request is made.
pub fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let client_config = RemoteClientConfig::new().with_timeout(config.timeout);
    let client = Arc::new(DefaultRemoteClient::new(&client_config)?);

    let session = match config.host.as_deref() {
        Some(raw) => {
            let host = HostAddress::resolve(raw).map_err(CliError::from)?;
            tracing::debug!(host = %host, timeout = ?config.timeout, "Session bootstrapped");
            ListingSession::with_host(client.clone(), host)
        }
        None => ListingSession::new(client.clone()),
    };

    Ok(CliContext { client, session })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_config_from_cli() {
        let cli = Cli::parse_from(["picozen", "--host", " 10.0.0.5 ", "--timeout", "3", "ls"]);
        let config = CliConfig::from_cli(&cli);
        assert_eq!(config.host.as_deref(), Some("10.0.0.5"));
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_blank_host_is_none() {
        let cli = Cli::parse_from(["picozen", "--host", "  ", "ls"]);
        assert!(CliConfig::from_cli(&cli).host.is_none());
    }

    #[test]
    fn test_bootstrap_with_host() {
        let ctx = bootstrap(CliConfig {
            host: Some("10.0.0.5:8080".to_string()),
            timeout: Duration::from_secs(1),
        })
        .unwrap();
        assert_eq!(ctx.require_host().unwrap().raw(), "10.0.0.5:8080");
        assert_eq!(ctx.session().current_path(), "/");
    }

    #[test]
    fn test_bootstrap_rejects_invalid_host() {
        let result = bootstrap(CliConfig {
            host: Some("ftp://10.0.0.5".to_string()),
            timeout: Duration::from_secs(1),
        });
        let err = result.err().unwrap();
        assert_eq!(err.downcast_ref::<CliError>().unwrap().exit_code(), 64);
    }

    #[test]
    fn test_bootstrap_without_host() {
        let ctx = bootstrap(CliConfig {
            host: None,
            timeout: Duration::from_secs(1),
        })
        .unwrap();
        assert!(matches!(ctx.require_host(), Err(CliError::NoHost)));
    }
}
