//! Endpoint handlers, grouped by concern

pub mod discovery;
pub mod generation;
pub mod info;
pub mod session;
pub mod upload;

pub use discovery::{discover_research, discover_resources, discover_videos};
pub use generation::{ask_question, generate_flashcards, generate_quiz, generate_summary};
pub use info::{health, root};
pub use session::{clear_session, session_info};
pub use upload::upload_pdf;
