//! Shared CLI presentation utilities.
//!
//! This module provides reusable display and formatting functions
//! for consistent CLI output across commands.
//!
//! # Guidelines
//!
//! - Keep this module format-only: no domain transforms
//! - Domain transforms belong in core services

pub mod listing;
pub mod tables;

// Re-export commonly used items
pub use listing::{
    connection_failure_message, print_connection_failure, print_listing, print_setup_instructions,
};
pub use tables::{bytes_readable, format_modified, separator, truncate_string};
