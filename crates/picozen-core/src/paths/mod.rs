//! Path utilities for picozen data directories and persisted settings.
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O - adapters handle user prompts separately
//! - OS-specific logic is kept private in `platform`

mod config;
mod error;
mod platform;

#[cfg(test)]
mod test_utils;

// Error type
pub use error::PathError;

// Platform detection and roots
pub use platform::{DATA_DIR_ENV, data_root};

// Configuration persistence
pub use config::{
    HOST_ENV_KEY, clear_persisted_host, env_file_path, persist_env_value, persist_host,
    persisted_host, read_env_value, remove_env_value,
};
