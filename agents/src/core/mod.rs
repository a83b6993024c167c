//! Prompt building, reply parsing and the study generators

pub mod parse;
pub mod prompt;
pub mod study;
