//! Router pieces: request extractors and endpoint handlers

pub mod extract;
pub mod handlers;

pub use extract::{ApiQuery, SessionId};
