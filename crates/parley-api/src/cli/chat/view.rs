//! Terminal implementation of the core `ChatView`.
//!
//! The terminal is append-only, so redraws print only what the user has not
//! seen yet: a full transcript when the active chat changes, otherwise just
//! the new bot messages. The recent list is kept for `/recent` and
//! `/switch` rather than printed on every refresh.

use std::time::Duration;

use console::style;
use crossterm::style::Color;
use indicatif::{ProgressBar, ProgressStyle};
use parley_core::chat::recent::RecentChat;
use parley_core::view::ChatView;
use parley_types::chat::{Chat, ChatId, ChatMessage, MessageRole};

use super::renderer::ChatRenderer;

pub struct TerminalView {
    renderer: ChatRenderer,
    /// Chat on screen and how many of its messages were printed.
    shown: Option<(ChatId, usize)>,
    recent: Vec<RecentChat>,
    spinner: Option<ProgressBar>,
    submit_enabled: bool,
}

impl TerminalView {
    pub fn new() -> Self {
        Self {
            renderer: ChatRenderer::new(Color::Cyan),
            shown: None,
            recent: Vec::new(),
            spinner: None,
            submit_enabled: true,
        }
    }

    /// The recent list as last rendered, in display order.
    pub fn recent(&self) -> &[RecentChat] {
        &self.recent
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    /// Print the numbered recent list.
    pub fn print_recent(&self) {
        println!();
        if self.recent.is_empty() {
            println!("  {}", style("No chats yet.").dim());
        }
        for (i, entry) in self.recent.iter().enumerate() {
            let marker = if entry.is_active { "*" } else { " " };
            let title = if entry.is_active {
                style(entry.title.as_str()).cyan().bold()
            } else {
                style(entry.title.as_str())
            };
            println!("  {} {:>2}. {}", style(marker).green(), i + 1, title);
        }
        println!();
    }

    /// Print every message of `chat`, regardless of what was shown before.
    pub fn print_transcript(&mut self, chat: &Chat) {
        self.print_header(chat);
        if chat.messages.is_empty() {
            println!("  {}", style("Ask anything to get started.").dim());
            println!();
        }
        for message in &chat.messages {
            self.print_message(message);
        }
        self.shown = Some((chat.id.clone(), chat.messages.len()));
    }

    fn print_header(&self, chat: &Chat) {
        println!();
        println!(
            "  {} {} {}",
            style("==").dim(),
            style(&chat.title).cyan().bold(),
            style(format!("({})", chat.id.short())).dim()
        );
        println!();
    }

    fn print_message(&self, message: &ChatMessage) {
        match message.role {
            MessageRole::User => {
                println!("  {} {}", style("You >").green().bold(), message.text);
                println!();
            }
            MessageRole::Bot => {
                println!("  {}", style("Bot >").cyan().bold());
                println!("{}", self.renderer.render(&message.text).trim_end());
                println!();
            }
            MessageRole::BotPending => {}
        }
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatView for TerminalView {
    fn render_messages(&mut self, chat: &Chat) {
        let already = match &self.shown {
            Some((id, count)) if id == &chat.id => *count,
            _ => {
                self.print_transcript(chat);
                return;
            }
        };

        // The user's own lines are already on screen from the prompt.
        for message in chat.messages.iter().skip(already) {
            if message.role != MessageRole::User {
                self.print_message(message);
            }
        }
        self.shown = Some((chat.id.clone(), chat.messages.len()));
    }

    fn render_recent(&mut self, entries: &[RecentChat]) {
        self.recent = entries.to_vec();
    }

    fn show_pending(&mut self, placeholder: &ChatMessage) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
            spinner.set_style(template);
        }
        spinner.set_message(placeholder.text.clone());
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    fn clear_pending(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }
}
