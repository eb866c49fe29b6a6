//! Async readline input for the chat loop.
//!
//! Wraps `rustyline_async::Readline` and classifies each line as a slash
//! command or a chat message.

use console::style;
use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

use super::commands::{self, ChatCommand};

/// What the user did at the prompt.
#[derive(Debug)]
pub enum InputEvent {
    /// A line that is not a slash command.
    Message(String),
    /// A slash command.
    Command(ChatCommand),
    /// An empty line.
    Blank,
    /// End of file (Ctrl+D).
    Eof,
    /// Interrupt signal (Ctrl+C).
    Interrupted,
}

/// Prompt text showing the active chat's title.
pub fn prompt_for(title: &str) -> String {
    format!("  {} {} ", style(title).dim(), style("You >").green().bold())
}

/// Turn a submitted line into an event.
pub fn classify(line: &str) -> InputEvent {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return InputEvent::Blank;
    }
    match commands::parse(trimmed) {
        Some(cmd) => InputEvent::Command(cmd),
        None => InputEvent::Message(trimmed.to_string()),
    }
}

/// Async input handler wrapping rustyline_async.
pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    /// Create the input handler.
    ///
    /// The returned `SharedWriter` prints without breaking the prompt line.
    pub fn new(prompt: String) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, stdout) = Readline::new(prompt)?;
        Ok((Self { rl }, stdout))
    }

    pub fn set_prompt(&mut self, prompt: &str) {
        let _ = self.rl.update_prompt(prompt);
    }

    /// Wait for the next line.
    pub async fn read(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => classify(&line),
            Ok(ReadlineEvent::Eof) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
            Err(_) => InputEvent::Eof,
        }
    }

    /// Clear the terminal screen.
    pub fn clear(&mut self) {
        let _ = self.rl.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_blank() {
        assert!(matches!(classify("   "), InputEvent::Blank));
    }

    #[test]
    fn test_classify_message_is_trimmed() {
        match classify("  hello there \n") {
            InputEvent::Message(text) => assert_eq!(text, "hello there"),
            other => panic!("expected message, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_command() {
        assert!(matches!(
            classify("/switch 2"),
            InputEvent::Command(ChatCommand::Switch(2))
        ));
    }
}
