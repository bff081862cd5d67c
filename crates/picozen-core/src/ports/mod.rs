//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` or HTML parser types in any signature
//! - Errors are domain-level; transport errors are mapped by adapters

pub mod listing;

pub use listing::{
    AttemptOutcome, FetchedListing, ListingError, ListingOutcome, ListingSource,
    NegotiationAttempt,
};
