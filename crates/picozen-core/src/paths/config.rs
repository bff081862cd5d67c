//! Settings persistence in the `.env` file under the data root.
//!
//! The file is a plain `KEY=value` list so that it can be loaded with
//! `dotenvy` at startup and edited by hand.

use std::fs;
use std::path::PathBuf;

use super::error::PathError;
use super::platform::data_root;

/// Key under which the last used host is stored.
pub const HOST_ENV_KEY: &str = "PICOZEN_HOST";

/// Location of the `.env` file that stores user settings.
pub fn env_file_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(".env"))
}

fn env_error(path: &PathBuf, e: &std::io::Error) -> PathError {
    PathError::EnvFileError {
        path: path.clone(),
        reason: e.to_string(),
    }
}

fn read_lines(path: &PathBuf) -> Result<Vec<String>, PathError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    Ok(fs::read_to_string(path)
        .map_err(|e| env_error(path, &e))?
        .lines()
        .map(ToString::to_string)
        .collect())
}

fn write_lines(path: &PathBuf, mut lines: Vec<String>) -> Result<(), PathError> {
    // Always end with a newline
    if lines.last().is_some_and(|l| !l.is_empty()) {
        lines.push(String::new());
    }
    fs::write(path, lines.join("\n")).map_err(|e| env_error(path, &e))
}

fn key_of(line: &str) -> Option<&str> {
    line.split_once('=').map(|(lhs, _)| lhs.trim())
}

/// Persist a key=value pair into the `.env` file.
///
/// If the key already exists, its first occurrence is updated and any
/// duplicates are dropped. Otherwise the pair is appended.
pub fn persist_env_value(key: &str, value: &str) -> Result<(), PathError> {
    let env_path = env_file_path()?;
    let lines = read_lines(&env_path)?;

    let mut updated = false;
    let mut output: Vec<String> = Vec::with_capacity(lines.len() + 1);
    for line in lines {
        if key_of(&line) == Some(key) {
            if !updated {
                output.push(format!("{key}={value}"));
                updated = true;
            }
        } else {
            output.push(line);
        }
    }

    if !updated {
        while output.last().is_some_and(String::is_empty) {
            output.pop();
        }
        output.push(format!("{key}={value}"));
    }

    write_lines(&env_path, output)
}

/// Remove every line defining `key`. Returns whether anything was removed.
pub fn remove_env_value(key: &str) -> Result<bool, PathError> {
    let env_path = env_file_path()?;
    let lines = read_lines(&env_path)?;
    let before = lines.len();

    let kept: Vec<String> = lines
        .into_iter()
        .filter(|line| key_of(line) != Some(key))
        .collect();

    if kept.len() == before {
        return Ok(false);
    }
    write_lines(&env_path, kept)?;
    Ok(true)
}

/// Read the value stored for `key`, if any.
pub fn read_env_value(key: &str) -> Result<Option<String>, PathError> {
    let env_path = env_file_path()?;
    Ok(read_lines(&env_path)?.iter().find_map(|line| {
        line.split_once('=')
            .filter(|(lhs, _)| lhs.trim() == key)
            .map(|(_, rhs)| rhs.trim().to_string())
    }))
}

/// Remember `host` as the default for later runs.
pub fn persist_host(host: &str) -> Result<(), PathError> {
    persist_env_value(HOST_ENV_KEY, host.trim())
}

/// The persisted host, if one was saved and is non-empty.
pub fn persisted_host() -> Result<Option<String>, PathError> {
    Ok(read_env_value(HOST_ENV_KEY)?.filter(|h| !h.is_empty()))
}

/// Forget the persisted host.
pub fn clear_persisted_host() -> Result<bool, PathError> {
    remove_env_value(HOST_ENV_KEY)
}
