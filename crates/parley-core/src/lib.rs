//! Chat session logic and port trait definitions for Parley.
//!
//! This crate defines the "ports" (key-value storage, reply service, feedback
//! sink, render callbacks) that the infrastructure and UI layers implement,
//! plus every rule about which chat is active and how a turn proceeds. It
//! depends only on `parley-types` -- never on `parley-infra` or any IO crate.

pub mod app;
pub mod chat;
pub mod remote;
pub mod storage;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;
