//! `parley show`: print one chat's transcript as Markdown or JSON.

use anyhow::{Context, Result};

use parley_types::chat::{Chat, ChatId, MessageRole};

use crate::state::AppState;

/// Print a chat, defaulting to the active one.
///
/// # Examples
///
/// ```bash
/// parley show
/// parley show 01929c3e-... --json
/// ```
pub async fn show_chat(state: &AppState, chat_id: Option<&str>, json: bool) -> Result<()> {
    let session = state.load_session().await;

    let chat = match chat_id {
        Some(raw) => {
            let id: ChatId = raw
                .parse()
                .with_context(|| format!("'{raw}' is not a valid chat id"))?;
            session
                .store()
                .find_by_id(&id)
                .with_context(|| format!("Chat '{id}' not found"))?
        }
        None => session
            .active_chat()
            .context("No active chat. Start one with: parley chat")?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(chat)?);
    } else {
        print!("{}", to_markdown(chat));
    }
    Ok(())
}

/// Markdown transcript of `chat`.
pub fn to_markdown(chat: &Chat) -> String {
    let mut out = format!("# {}\n\n", chat.title);
    out.push_str(&format!(
        "- **Created:** {}\n- **Messages:** {}\n- **ID:** {}\n\n---\n\n",
        chat.created_at.format("%Y-%m-%d %H:%M UTC"),
        chat.messages.len(),
        chat.id
    ));

    for message in &chat.messages {
        let label = match message.role {
            MessageRole::User => "**You**",
            MessageRole::Bot => "**Bot**",
            MessageRole::BotPending => continue,
        };
        out.push_str(&format!("### {label}\n\n{}\n\n", message.text));
    }
    out
}
