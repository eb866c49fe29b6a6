//! Slash command parsing for the chat loop.
//!
//! Commands start with `/`. Everything else typed at the prompt is a chat
//! message.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq, Eq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat loop.
    Exit,
    /// Start (or reuse) an empty chat.
    New,
    /// List recent chats with their numbers.
    Recent,
    /// Make the n-th entry of the recent list active (1-based).
    Switch(usize),
    /// Reprint the active chat's transcript.
    History,
    /// Rate the last answer up.
    Up,
    /// Rate the last answer down.
    Down,
    /// Comment on the last answer.
    Comment(String),
    /// Unknown or malformed command, with a message for the user.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (cmd, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((cmd, arg)) => (cmd.to_lowercase(), arg.trim()),
        None => (trimmed.to_lowercase(), ""),
    };

    let command = match cmd.as_str() {
        "/help" | "/h" | "/?" => ChatCommand::Help,
        "/clear" | "/cls" => ChatCommand::Clear,
        "/exit" | "/quit" | "/q" => ChatCommand::Exit,
        "/new" => ChatCommand::New,
        "/recent" | "/ls" => ChatCommand::Recent,
        "/history" => ChatCommand::History,
        "/up" | "/+1" => ChatCommand::Up,
        "/down" | "/-1" => ChatCommand::Down,
        "/switch" | "/sw" => match arg.parse::<usize>() {
            Ok(n) if n > 0 => ChatCommand::Switch(n),
            _ => ChatCommand::Unknown("/switch needs a number from /recent".to_string()),
        },
        "/comment" => {
            if arg.is_empty() {
                ChatCommand::Unknown("/comment needs some text".to_string())
            } else {
                ChatCommand::Comment(arg.to_string())
            }
        }
        other => ChatCommand::Unknown(format!("Unknown command: {other}")),
    };
    Some(command)
}

/// Print the help text listing all available commands.
pub fn print_help() {
    let rows = [
        ("/help", "Show this help message"),
        ("/new", "Start a new chat"),
        ("/recent", "List recent chats"),
        ("/switch <n>", "Open chat number n from /recent"),
        ("/history", "Show the active chat again"),
        ("/up", "Rate the last answer as helpful"),
        ("/down", "Rate the last answer as unhelpful"),
        ("/comment <text>", "Leave a comment on the last answer"),
        ("/clear", "Clear the screen"),
        ("/exit", "Leave the chat"),
    ];

    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    for (cmd, text) in rows {
        println!("  {:<18}{}", style(cmd).cyan(), text);
    }
    println!();
    println!("  {}", style("Ctrl+D to exit. Chats are saved as you go.").dim());
    println!();
}
