use std::collections::HashSet;

use crate::common::PeerRecord;

/// One sidebar row, render-ready.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerEntry {
    pub user_id: String,
    /// First 16 characters of the id, shown under the name.
    pub short_id: String,
    pub display_name: String,
    pub online: bool,
    /// `None` means no badge: either nothing unread, or this is the active
    /// chat, whose count is always suppressed while it is on screen.
    pub unread_badge: Option<u32>,
    pub active: bool,
}

/// Render-ready merge of the three independently polled views.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewModel {
    pub peers: Vec<PeerEntry>,
    pub neighbor_count: usize,
    pub active_chat_title: Option<String>,
}

/// Merge roster, online set and the active chat into one view model.
///
/// Pure and idempotent; called after every state poll and every session
/// transition.
pub fn reconcile(
    roster: &[PeerRecord],
    online: &HashSet<String>,
    active_chat: Option<&str>,
) -> ViewModel {
    let peers = roster
        .iter()
        .map(|peer| {
            let active = active_chat == Some(peer.user_id.as_str());
            PeerEntry {
                user_id: peer.user_id.clone(),
                short_id: truncate_id(&peer.user_id, 16),
                display_name: display_name(peer),
                online: online.contains(&peer.user_id),
                unread_badge: (!active && peer.unread_count > 0).then_some(peer.unread_count),
                active,
            }
        })
        .collect();

    // The roster entry can be momentarily missing right after selecting an
    // unseen id; fall back to the truncated id until the refresh lands.
    let active_chat_title = active_chat.map(|chat_id| {
        roster
            .iter()
            .find(|peer| peer.user_id == chat_id)
            .map(display_name)
            .unwrap_or_else(|| fallback_name(chat_id))
    });

    ViewModel {
        peers,
        neighbor_count: online.len(),
        active_chat_title,
    }
}

fn display_name(peer: &PeerRecord) -> String {
    match &peer.nickname {
        Some(name) if !name.is_empty() => name.clone(),
        _ => fallback_name(&peer.user_id),
    }
}

fn fallback_name(user_id: &str) -> String {
    format!("{}...", truncate_id(user_id, 8))
}

pub fn truncate_id(user_id: &str, len: usize) -> String {
    user_id.chars().take(len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer(user_id: &str, nickname: Option<&str>, unread_count: u32) -> PeerRecord {
        PeerRecord {
            user_id: user_id.to_string(),
            nickname: nickname.map(str::to_string),
            unread_count,
        }
    }

    fn online(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn online_flag_tracks_set_membership_only() {
        let roster = vec![
            peer("abc123def456ghi789", None, 0),
            peer("zzz999yyy888xxx777", Some("bob"), 5),
        ];
        let view = reconcile(&roster, &online(&["abc123def456ghi789"]), None);

        assert!(view.peers[0].online);
        assert!(!view.peers[1].online);
        assert_eq!(view.neighbor_count, 1);
    }

    #[test]
    fn unnamed_peer_shows_truncated_id_with_badge() {
        // roster [{user_id, no nickname, unread 3}], peer online, no chat open
        let roster = vec![peer("abc123def456ghi789", None, 3)];
        let view = reconcile(&roster, &online(&["abc123def456ghi789"]), None);

        let entry = &view.peers[0];
        assert_eq!(entry.display_name, "abc123de...");
        assert_eq!(entry.short_id, "abc123def456ghi7");
        assert!(entry.online);
        assert_eq!(entry.unread_badge, Some(3));
        assert!(!entry.active);
    }

    #[test]
    fn active_chat_badge_is_suppressed_despite_server_count() {
        let roster = vec![peer("abc123def456ghi789", None, 3)];
        let view = reconcile(
            &roster,
            &online(&["abc123def456ghi789"]),
            Some("abc123def456ghi789"),
        );

        let entry = &view.peers[0];
        assert_eq!(entry.unread_badge, None);
        assert!(entry.active);
    }

    #[test]
    fn zero_unread_count_shows_no_badge() {
        let roster = vec![peer("abc123def456ghi789", None, 0)];
        let view = reconcile(&roster, &HashSet::new(), None);
        assert_eq!(view.peers[0].unread_badge, None);
    }

    #[test]
    fn nickname_wins_over_truncated_id() {
        let roster = vec![peer("abc123def456ghi789", Some("alice"), 0)];
        let view = reconcile(&roster, &HashSet::new(), Some("abc123def456ghi789"));

        assert_eq!(view.peers[0].display_name, "alice");
        assert_eq!(view.active_chat_title.as_deref(), Some("alice"));
    }

    #[test]
    fn title_falls_back_to_truncated_id_when_roster_lacks_the_peer() {
        let view = reconcile(&[], &HashSet::new(), Some("abc123def456ghi789"));
        assert_eq!(view.active_chat_title.as_deref(), Some("abc123de..."));
    }

    #[test]
    fn reconcile_is_idempotent() {
        let roster = vec![
            peer("abc123def456ghi789", Some("alice"), 2),
            peer("zzz999yyy888xxx777", None, 0),
        ];
        let reachable = online(&["zzz999yyy888xxx777"]);

        let first = reconcile(&roster, &reachable, Some("abc123def456ghi789"));
        let second = reconcile(&roster, &reachable, Some("abc123def456ghi789"));
        assert_eq!(first, second);
    }

    #[test]
    fn truncate_id_is_character_based() {
        assert_eq!(truncate_id("short", 16), "short");
        assert_eq!(truncate_id("abcdefghij", 8), "abcdefgh");
    }
}
