//! Recent-chats view model.
//!
//! Derives the short list of chats shown beside the conversation. Pure: no
//! session access, no rendering.

use std::collections::HashSet;

use parley_types::chat::{Chat, ChatId};
use serde::Serialize;

/// Default number of entries in the recent list.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// One row of the recent-chats list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentChat {
    pub id: ChatId,
    pub title: String,
    pub is_active: bool,
}

/// Newest-first list of chats with the active chat pinned on top.
///
/// Pinning happens before truncation, so the active chat is listed even when
/// it is older than the `limit` newest chats. Ids never repeat. A `limit` of
/// zero is treated as one so the active chat is never dropped.
pub fn build_recent_list(
    chats: &[Chat],
    active_chat_id: Option<&ChatId>,
    limit: usize,
) -> Vec<RecentChat> {
    let mut ordered: Vec<&Chat> = chats.iter().collect();
    ordered.sort_by(|a, b| b.recency_key().cmp(&a.recency_key()));

    if let Some(active) = active_chat_id {
        if let Some(pos) = ordered.iter().position(|c| &c.id == active) {
            let pinned = ordered.remove(pos);
            ordered.insert(0, pinned);
        }
    }

    let mut seen = HashSet::new();
    ordered
        .into_iter()
        .filter(|chat| seen.insert(&chat.id))
        .take(limit.max(1))
        .map(|chat| RecentChat {
            id: chat.id.clone(),
            title: chat.title.clone(),
            is_active: Some(&chat.id) == active_chat_id,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    /// Chats created one minute apart, oldest first.
    fn chats(n: usize) -> Vec<Chat> {
        let base = Utc::now() - Duration::hours(1);
        (0..n)
            .map(|i| {
                let mut chat = Chat::new();
                chat.title = format!("chat {i}");
                chat.created_at = base + Duration::minutes(i as i64);
                chat
            })
            .collect()
    }

    #[test]
    fn test_sorted_newest_first() {
        let chats = chats(3);
        let list = build_recent_list(&chats, None, DEFAULT_RECENT_LIMIT);
        let titles: Vec<_> = list.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["chat 2", "chat 1", "chat 0"]);
        assert!(list.iter().all(|r| !r.is_active));
    }

    #[test]
    fn test_oldest_active_is_pinned_before_truncation() {
        let chats = chats(8);
        let active = chats[0].id.clone();

        let list = build_recent_list(&chats, Some(&active), DEFAULT_RECENT_LIMIT);

        assert_eq!(list.len(), 5);
        assert_eq!(list[0].id, active);
        assert!(list[0].is_active);
        assert_eq!(list.iter().filter(|r| r.is_active).count(), 1);
        let titles: Vec<_> = list.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["chat 0", "chat 7", "chat 6", "chat 5", "chat 4"]);

        let unique: HashSet<_> = list.iter().map(|r| &r.id).collect();
        assert_eq!(unique.len(), list.len());
    }

    #[test]
    fn test_active_already_first_is_not_duplicated() {
        let chats = chats(3);
        let active = chats[2].id.clone();
        let list = build_recent_list(&chats, Some(&active), DEFAULT_RECENT_LIMIT);
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].id, active);
    }

    #[test]
    fn test_unknown_active_id_is_ignored() {
        let chats = chats(2);
        let list = build_recent_list(&chats, Some(&ChatId::new()), DEFAULT_RECENT_LIMIT);
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|r| !r.is_active));
    }

    #[test]
    fn test_duplicate_ids_collapse() {
        let mut chats = chats(2);
        chats.push(chats[0].clone());
        let list = build_recent_list(&chats, None, DEFAULT_RECENT_LIMIT);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_zero_limit_still_lists_active() {
        let chats = chats(3);
        let active = chats[1].id.clone();
        let list = build_recent_list(&chats, Some(&active), 0);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, active);
        assert!(list[0].is_active);
    }

    #[test]
    fn test_empty_collection() {
        assert!(build_recent_list(&[], None, DEFAULT_RECENT_LIMIT).is_empty());
    }
}
