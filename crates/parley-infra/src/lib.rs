//! Infrastructure layer for Parley.
//!
//! Contains implementations of the ports defined in `parley-core`: the
//! SQLite key-value store, the HTTP reply client and feedback sink, plus
//! config loading and data directory resolution.

pub mod config;
pub mod filesystem;
pub mod http;
pub mod sqlite;
