//! Chat session lifecycle for Parley.
//!
//! - [`store`]: the in-memory chat collection
//! - [`session`]: the session object (collection + active id + persistence)
//! - [`controller`]: which chat is active, and when to create one
//! - [`recent`]: the recent-chats view model
//! - [`flow`]: user turns against the reply service
//! - [`feedback`]: the per-answer feedback affordance

pub mod controller;
pub mod feedback;
pub mod flow;
pub mod recent;
pub mod session;
pub mod store;
