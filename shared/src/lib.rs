//! Shared types for the study assistant service
//!
//! Contains the domain types that cross crate boundaries: operation kinds,
//! fallback policies, study artifacts and extraction reports. Crate-internal
//! types (HTTP request bodies, policy table internals) stay in their crates.

pub mod types;
pub mod errors;
pub mod logging;

pub use types::*;
pub use errors::*;
