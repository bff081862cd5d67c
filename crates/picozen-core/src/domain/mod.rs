//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (HTTP, filesystem, terminal).
//!
//! # Structure
//!
//! - `host` - Host string resolution (`HostAddress`)
//! - `path` - Remote path normalization
//! - `entry` - Listing entries (`Entry`, `EntryKind`)
//! - `listing` - Assembled listings (`ListingResult`)
//! - `dialect` - Query-parameter dialects
//! - `download` - Download URL construction

mod dialect;
mod download;
mod entry;
mod host;
mod listing;
mod path;

pub use dialect::{ACTION_PARAM, DOWNLOAD_ACTION, Dialect, LIST_ACTION};
pub use download::build_download_url;
pub use entry::{BACK_ENTRY_NAME, Entry, EntryKind};
pub use host::{HostAddress, HostError};
pub use listing::{ListingFormat, ListingResult};
pub use path::{ROOT_PATH, is_root, join_path, normalize_path, parent_path};
