//! Core services - orchestration over the ports.
//!
//! Services here don't know about concrete implementations; they are handed
//! a port trait object by the composition root.

mod session;

pub use session::{ListingSession, Navigation, SessionState};
