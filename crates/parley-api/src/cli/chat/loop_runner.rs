//! The interactive chat loop.
//!
//! Reads lines, turns them into core `UiEvent`s, and prints whatever the
//! dispatcher reports back. All chat state lives in `ChatApp`; this module
//! only talks to the terminal.

use console::style;
use parley_core::app::{ChatApp, DispatchOutcome, UiEvent};
use parley_core::chat::feedback::FeedbackResult;
use parley_core::chat::flow::{MessageFlowController, TurnRejected};
use parley_infra::http::feedback::HttpFeedbackSink;
use parley_infra::http::reply::HttpReplyClient;
use parley_types::feedback::{FeedbackChoice, Rating};
use tracing::info;

use crate::state::{AppState, LocalStore};

use super::banner::{outcome_label, print_welcome_banner};
use super::commands::{self, ChatCommand};
use super::input::{prompt_for, ChatInput, InputEvent};
use super::view::TerminalView;

type TerminalApp = ChatApp<LocalStore, HttpReplyClient, HttpFeedbackSink, TerminalView>;

/// What the loop should do after handling a line.
enum Step {
    Continue,
    Exit,
}

/// Run the chat loop until the user exits.
///
/// With `force_new` the loop starts on a fresh chat, as `/new` would.
pub async fn run_chat_loop(state: &AppState, force_new: bool) -> anyhow::Result<()> {
    let session = state.load_session().await;
    let persistent = session.persistence().store().is_persistent();
    let flow = MessageFlowController::new(state.reply_client()?, TerminalView::new());

    print_welcome_banner(&state.config.api_base_url, session.store().len(), !persistent);
    let (mut app, outcome) = ChatApp::start(
        session,
        flow,
        state.feedback_sink()?,
        state.app_options(),
        force_new,
    )
    .await;
    info!(chat_id = %outcome.chat_id(), "Chat loop started");
    println!("  {}", style(outcome_label(&outcome)).dim());

    let (mut input, _writer) = ChatInput::new(active_prompt(&app))
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let step = match input.read().await {
            InputEvent::Eof => Step::Exit,
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                Step::Continue
            }
            InputEvent::Blank => Step::Continue,
            InputEvent::Message(text) => {
                send_message(&mut app, text).await;
                Step::Continue
            }
            InputEvent::Command(ChatCommand::Clear) => {
                input.clear();
                Step::Continue
            }
            InputEvent::Command(cmd) => run_command(&mut app, cmd).await,
        };

        if let Step::Exit = step {
            break;
        }
        input.set_prompt(&active_prompt(&app));
    }

    println!("\n  {}", style("Chat ended.").dim());
    Ok(())
}

fn active_prompt(app: &TerminalApp) -> String {
    let title = app
        .session()
        .active_chat()
        .map(|c| c.title.as_str())
        .unwrap_or_default();
    prompt_for(title)
}

async fn send_message(app: &mut TerminalApp, text: String) {
    match app.dispatch(UiEvent::Submit(text)).await {
        DispatchOutcome::Delivered {
            feedback_offered: true,
            ..
        } => {
            println!(
                "  {}",
                style("Rate this answer: /up  /down  /comment <text>").dim()
            );
            println!();
        }
        DispatchOutcome::Rejected(TurnRejected::Busy) => {
            println!("  {}", style("Still waiting for the last reply.").yellow());
        }
        DispatchOutcome::Rejected(reason) => {
            println!("  {} {reason}", style("!").yellow().bold());
        }
        _ => {}
    }
}

async fn run_command(app: &mut TerminalApp, cmd: ChatCommand) -> Step {
    match cmd {
        ChatCommand::Help => commands::print_help(),
        ChatCommand::Exit => return Step::Exit,
        ChatCommand::Clear => {}
        ChatCommand::New => {
            app.dispatch(UiEvent::NewChat).await;
        }
        ChatCommand::Recent => app.view().print_recent(),
        ChatCommand::Switch(n) => {
            let target = app.view().recent().get(n - 1).map(|r| r.id.clone());
            match target {
                Some(id) => {
                    if let DispatchOutcome::SelectFailed(e) =
                        app.dispatch(UiEvent::SelectChat(id)).await
                    {
                        println!("  {} {e}", style("!").red().bold());
                    }
                }
                None => println!(
                    "  {} No chat number {n}. Type /recent to see the list.",
                    style("?").yellow().bold()
                ),
            }
        }
        ChatCommand::History => {
            if let Some(chat) = app.session().active_chat().cloned() {
                app.view_mut().print_transcript(&chat);
            }
        }
        ChatCommand::Up => rate(app, FeedbackChoice::Up).await,
        ChatCommand::Down => rate(app, FeedbackChoice::Down).await,
        ChatCommand::Comment(text) => rate(app, FeedbackChoice::Comment(text)).await,
        ChatCommand::Unknown(message) => {
            println!(
                "\n  {} {}. Type /help for available commands.\n",
                style("?").yellow().bold(),
                style(message).dim()
            );
        }
    }
    Step::Continue
}

async fn rate(app: &mut TerminalApp, choice: FeedbackChoice) {
    let line = match app.dispatch(UiEvent::Feedback(choice)).await {
        DispatchOutcome::Feedback(FeedbackResult::Sent(rating)) => match rating {
            Rating::Up => "Thanks! Marked as helpful.",
            Rating::Down => "Thanks! Marked as unhelpful.",
            Rating::Comment => "Thanks for the comment.",
        },
        DispatchOutcome::Feedback(FeedbackResult::AlreadySubmitted) => {
            "Feedback for this answer was already sent."
        }
        DispatchOutcome::Feedback(FeedbackResult::EmptyComment) => "A comment needs some text.",
        _ => "There is no answer to rate yet.",
    };
    println!("  {}", style(line).dim());
    println!();
}
