//! Storage abstractions for Parley.
//!
//! Defines the key-value store port, an in-memory implementation of it, and
//! the persistence adapter that maps the chat collection and active-chat id
//! onto two named slots. Durable implementations live in parley-infra.

pub mod kv_store;
pub mod memory;
pub mod persistence;
