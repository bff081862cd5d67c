//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call session or client methods
//!   3. Format output for the terminal
//!
//! Handlers should NOT contain listing or negotiation logic.

pub mod browse;
pub mod get;
pub mod host;
pub mod ls;
pub mod url;
pub mod watch;

use picozen_core::HostAddress;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_setup_instructions;

/// The configured host; prints setup instructions when there is none.
pub(crate) fn require_host(ctx: &CliContext) -> Result<HostAddress, CliError> {
    ctx.require_host().inspect_err(|_| print_setup_instructions())
}
