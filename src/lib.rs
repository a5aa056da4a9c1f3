//! mangalag library
//!
//! Exposes the reading-list pipeline (client, derivation, cache, refresh) and
//! the CLI parsing for use in integration tests.

pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod format;
pub mod refresh;
