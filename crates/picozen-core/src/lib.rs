#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod paths;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    ACTION_PARAM, BACK_ENTRY_NAME, DOWNLOAD_ACTION, Dialect, Entry, EntryKind, HostAddress,
    HostError, LIST_ACTION, ListingFormat, ListingResult, ROOT_PATH, build_download_url, is_root,
    join_path, normalize_path, parent_path,
};
pub use ports::{
    AttemptOutcome, FetchedListing, ListingError, ListingOutcome, ListingSource,
    NegotiationAttempt,
};
pub use services::{ListingSession, Navigation, SessionState};

// Re-export path utilities
pub use paths::{
    DATA_DIR_ENV, HOST_ENV_KEY, PathError, clear_persisted_host, data_root, env_file_path,
    persist_env_value, persist_host, persisted_host, read_env_value, remove_env_value,
};
