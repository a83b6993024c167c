//! Shared test support for the HTTP API tests
#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::TestFixtures;
pub use helpers::{AppBuilder, SlowKeywords, SlowStudy, TestHelpers};
