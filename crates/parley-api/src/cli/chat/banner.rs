//! Welcome banner for the chat loop.

use console::style;
use parley_core::chat::controller::ActiveChatOutcome;

/// One-line description of how the active chat was chosen.
pub fn outcome_label(outcome: &ActiveChatOutcome) -> &'static str {
    match outcome {
        ActiveChatOutcome::Created(_) => "Started a new chat.",
        ActiveChatOutcome::Reused(_) => "Picking up your empty chat.",
        ActiveChatOutcome::Switched(_) => "Switched to an empty chat.",
    }
}

/// Print the banner shown when the chat loop starts.
pub fn print_welcome_banner(api_url: &str, chat_count: usize, ephemeral: bool) {
    println!();
    println!("  {} {}", style("*").cyan(), style("Parley").cyan().bold());
    println!();
    println!("  {}  {}", style("Service:").bold(), style(api_url).dim());
    println!("  {}    {} saved", style("Chats:").bold(), chat_count);
    if ephemeral {
        println!(
            "  {}",
            style("Ephemeral mode: nothing is saved after exit").yellow()
        );
    }
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
}
