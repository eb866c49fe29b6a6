//! Render callbacks.
//!
//! The core never draws anything itself. After each state change it calls
//! into a `ChatView`, which the front-end implements (terminal, tests, ...).

use parley_types::chat::{Chat, ChatMessage};

use crate::chat::recent::RecentChat;

/// Render surface driven by the message flow and the dispatcher.
pub trait ChatView {
    /// Redraw the full message list of the active chat.
    fn render_messages(&mut self, chat: &Chat);

    /// Redraw the recent-chats list.
    fn render_recent(&mut self, entries: &[RecentChat]);

    /// Show the placeholder bubble while a reply is pending.
    fn show_pending(&mut self, placeholder: &ChatMessage);

    /// Remove the pending placeholder.
    fn clear_pending(&mut self);

    /// Enable or disable the submit control.
    fn set_submit_enabled(&mut self, enabled: bool);
}
