//! `url` command handler.

use anyhow::Result;
use picozen_core::{Entry, is_root, normalize_path};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Print the download URL for a remote file.
pub fn execute(ctx: &CliContext, path: &str) -> Result<()> {
    let path = normalize_path(path);
    if is_root(&path) {
        return Err(CliError::InvalidPath(path).into());
    }

    super::require_host(ctx)?;
    let entry = Entry::file(super::get::file_name(&path), &path, 0);
    println!("{}", ctx.session().download_url(&entry).map_err(CliError::from)?);
    Ok(())
}
