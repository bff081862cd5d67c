//! `get` command handler and the download step shared with `browse`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use picozen_core::{Entry, is_root, normalize_path};
use url::Url;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::bytes_readable;
use crate::utils::input::prompt_confirmation;

/// Download a remote file by path.
pub async fn execute(
    ctx: &CliContext,
    path: &str,
    output: Option<&Path>,
    force: bool,
) -> Result<()> {
    let path = normalize_path(path);
    if is_root(&path) {
        return Err(CliError::InvalidPath(path).into());
    }

    super::require_host(ctx)?;
    let entry = Entry::file(file_name(&path), &path, 0);
    let url = ctx.session().download_url(&entry).map_err(CliError::from)?;

    download(ctx, &entry.name, &url, output, force).await?;
    Ok(())
}

/// Fetch `url` into `output` (or `./<name>`), asking before overwriting.
///
/// Returns the destination, or `None` when the user declined to overwrite.
pub async fn download(
    ctx: &CliContext,
    name: &str,
    url: &Url,
    output: Option<&Path>,
    force: bool,
) -> Result<Option<PathBuf>> {
    let dest = destination(name, output);

    if dest.exists() && !force && !prompt_confirmation(&format!("{} exists. Overwrite?", dest.display()))? {
        println!("Skipped {name}.");
        return Ok(None);
    }

    println!("Downloading {name}...");
    let written = ctx
        .client()
        .download_to(url, &dest)
        .await
        .map_err(CliError::from)?;

    tracing::info!(url = %url, dest = %dest.display(), bytes = written, "Download complete");
    println!("✓ Saved {} ({})", dest.display(), bytes_readable(written));
    Ok(Some(dest))
}

/// Last path segment of a normalized remote path.
pub(crate) fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Where a download lands: the explicit output, or the entry name in the
/// current directory. An output that is an existing directory gets the
/// entry name appended.
fn destination(name: &str, output: Option<&Path>) -> PathBuf {
    match output {
        Some(out) if out.is_dir() => out.join(name),
        Some(out) => out.to_path_buf(),
        None => PathBuf::from(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("/a/b.apk"), "b.apk");
        assert_eq!(file_name("/b.apk"), "b.apk");
    }

    #[test]
    fn test_destination() {
        assert_eq!(destination("b.apk", None), PathBuf::from("b.apk"));
        assert_eq!(
            destination("b.apk", Some(Path::new("renamed.apk"))),
            PathBuf::from("renamed.apk")
        );

        let dir = tempfile::tempdir().unwrap();
        assert_eq!(destination("b.apk", Some(dir.path())), dir.path().join("b.apk"));
    }
}
