//! Collaborators for the study assistant
//!
//! Everything the service delegates to lives here behind a narrow trait:
//! the chat completion client, PDF text extraction, topic and keyword
//! extraction, paper/video/web-resource discovery and the study generators
//! built on top of the completion client. Handlers only ever see the traits,
//! so tests swap in `mockall` mocks or slow fakes.

pub mod core;
pub mod error;
pub mod services;
pub mod traits;

pub use crate::core::study::StudyAgents;
pub use error::{AgentError, AgentResult, ApiFailure};
pub use services::*;
pub use traits::*;
