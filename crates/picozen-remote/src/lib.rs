#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod http;
mod interpret;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{DefaultRemoteClient, RemoteClient};

// Configuration
pub use config::{DEFAULT_TIMEOUT, LISTING_ACCEPT, RemoteClientConfig};

// Errors
pub use error::{RemoteError, RemoteResult};

// Transport
pub use http::{HttpBackend, RawResponse, ReqwestBackend};

// Interpretation
pub use interpret::{
    ContentNegotiatingInterpreter, HtmlIndexInterpreter, JsonListingInterpreter, ParsedListing,
    ResponseInterpreter,
};

// Silence unused dev-dependency warnings (used by integration tests)
#[cfg(test)]
use axum as _;
#[cfg(test)]
use tokio_test as _;
