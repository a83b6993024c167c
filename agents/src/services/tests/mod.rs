//! Tests for collaborator services

mod keywords;
mod papers;
mod videos;
