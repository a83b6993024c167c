//! Collaborator implementations

pub mod keywords;
pub mod openai_client;
pub mod papers;
pub mod pdf_extractor;
pub mod videos;
pub mod web_resources;

#[cfg(test)]
pub mod tests;

pub use keywords::*;
pub use openai_client::*;
pub use papers::*;
pub use pdf_extractor::*;
pub use videos::*;
pub use web_resources::*;
