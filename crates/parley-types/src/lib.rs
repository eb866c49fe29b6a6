//! Shared domain types for Parley.
//!
//! This crate contains the core domain types used across the Parley client:
//! chats, messages, feedback and reply wire payloads, configuration, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod feedback;
pub mod reply;
