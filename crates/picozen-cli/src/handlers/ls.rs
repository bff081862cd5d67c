//! `ls` command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{print_connection_failure, print_listing};

/// List `path` once and print it as a table or JSON.
pub async fn execute(ctx: &CliContext, path: &str, json: bool) -> Result<()> {
    let host = super::require_host(ctx)?;

    match ctx.session().list(path).await {
        Ok(listing) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                print_listing(host.raw(), &listing, false);
            }
            Ok(())
        }
        Err(err) => {
            print_connection_failure(host.raw(), &err);
            Err(CliError::from(err).into())
        }
    }
}
