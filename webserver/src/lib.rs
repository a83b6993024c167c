//! HTTP surface of the study assistant
//!
//! Accepts PDF uploads, keeps the extracted text in a per-caller session and
//! serves summaries, flashcards, quizzes, question answers and resource
//! discovery. Every collaborator call goes through the
//! [`BoundedOrchestrator`](orchestrator::BoundedOrchestrator), so a slow model
//! or search API degrades a response instead of hanging it.

pub mod config;
pub mod error;
pub mod session;
pub mod state;
pub mod types;
pub mod upload;
pub mod web;
pub mod webserver_impl;

pub use config::{Args, ConfigError, Credentials, ServerConfig};
pub use error::{WebServerError, WebServerResult};
pub use session::{DEFAULT_SESSION_ID, InMemorySessionStore, Session, SessionSnapshot, SessionStore};
pub use state::{AppState, Collaborators};
pub use types::*;
pub use web::SessionId;
pub use webserver_impl::WebServer;
