//! Platform-specific data directory resolution.

use std::env;
use std::fs;
use std::path::PathBuf;

use super::error::PathError;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "PICOZEN_DATA_DIR";

/// Get the root directory for application data (`.env` settings file).
///
/// Resolution order:
/// 1. `PICOZEN_DATA_DIR` environment variable (highest priority)
/// 2. System data directory (e.g., `~/.local/share/picozen`)
///
/// The directory is created if it does not exist.
pub fn data_root() -> Result<PathBuf, PathError> {
    let root = match env::var(DATA_DIR_ENV) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => dirs::data_local_dir()
            .ok_or(PathError::NoDataDir)?
            .join("picozen"),
    };

    if !root.exists() {
        fs::create_dir_all(&root).map_err(|e| PathError::CreateFailed {
            path: root.clone(),
            reason: e.to_string(),
        })?;
    }

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::test_utils::{ENV_LOCK, EnvVarGuard};
    use tempfile::tempdir;

    #[test]
    fn test_data_root_honors_override_and_creates_it() {
        let _guard = ENV_LOCK.lock().unwrap();
        let temp = tempdir().unwrap();
        let target = temp.path().join("nested").join("picozen");
        let _env = EnvVarGuard::set(DATA_DIR_ENV, target.to_string_lossy().as_ref());

        let root = data_root().unwrap();
        assert_eq!(root, target);
        assert!(root.is_dir());
    }
}
