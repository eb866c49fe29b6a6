//! Interactive terminal chat for Parley.
//!
//! Implements the chat loop on top of the core dispatcher: slash commands,
//! markdown rendering, a pending spinner, and the welcome banner. Entry
//! point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
pub mod view;
