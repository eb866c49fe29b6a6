//! `parley recent`: the recent-chats list outside the chat loop.
//!
//! Read-only: listing never creates or activates a chat.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use parley_core::chat::recent::{build_recent_list, RecentChat};
use parley_types::chat::Chat;

use crate::state::AppState;

/// Longest title shown before truncating with an ellipsis.
const TITLE_WIDTH: usize = 40;

/// List recent chats, newest first, with the active chat pinned on top.
///
/// # Examples
///
/// ```bash
/// parley recent
/// parley recent --limit 10 --json
/// ```
pub async fn list_recent(state: &AppState, limit: Option<usize>, json: bool) -> Result<()> {
    let session = state.load_session().await;
    let limit = limit.unwrap_or(state.app_options().recent_limit);
    let entries = build_recent_list(session.store().chats(), session.active_chat_id(), limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!();
        println!(
            "  {} No chats yet. Start one with: {}",
            style("i").blue().bold(),
            style("parley chat").yellow()
        );
        println!();
        return Ok(());
    }

    let table = build_table(&entries, session.store().chats());

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} of {} chat{}",
        style(entries.len()).bold(),
        session.store().len(),
        if session.store().len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

fn build_table(entries: &[RecentChat], chats: &[Chat]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Title").fg(Color::White),
        Cell::new("Created").fg(Color::White),
        Cell::new("Messages").fg(Color::White),
        Cell::new("ID").fg(Color::White),
    ]);

    for (i, entry) in entries.iter().enumerate() {
        let chat = chats.iter().find(|c| c.id == entry.id);
        let created = chat
            .map(|c| c.created_at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let messages = chat.map(|c| c.messages.len()).unwrap_or(0);

        let title_cell = Cell::new(truncate_title(&entry.title));
        let title_cell = if entry.is_active {
            title_cell.fg(Color::Green)
        } else {
            title_cell.fg(Color::Cyan)
        };
        let number = if entry.is_active {
            format!("{}*", i + 1)
        } else {
            (i + 1).to_string()
        };

        table.add_row(vec![
            Cell::new(number).fg(Color::White),
            title_cell,
            Cell::new(created).fg(Color::DarkGrey),
            Cell::new(messages.to_string()).fg(Color::White),
            Cell::new(entry.id.short()).fg(Color::DarkGrey),
        ]);
    }

    table
}

fn truncate_title(title: &str) -> String {
    if title.chars().count() > TITLE_WIDTH {
        let cut: String = title.chars().take(TITLE_WIDTH - 3).collect();
        format!("{cut}...")
    } else {
        title.to_string()
    }
}
