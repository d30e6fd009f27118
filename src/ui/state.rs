use std::collections::HashSet;
use std::time::Instant;

use crate::common::{ChatMessage, PeerRecord};

use super::session::ChatSession;
use super::view::{self, ViewModel};

/// What applying a freshly fetched history did to the UI state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagesOutcome {
    /// The response was for a chat that is no longer active; dropped.
    StaleChat,
    /// Content identical to what is already displayed; nothing was touched.
    Unchanged,
    Updated { new_arrivals: bool },
}

/// Local UI state: cached node views, the session, and widget inputs.
pub struct AppState {
    pub my_id: String,
    /// Read-only copy of the node's roster, replaced wholesale each poll.
    pub roster: Vec<PeerRecord>,
    pub online: HashSet<String>,
    pub session: ChatSession,
    pub messages: Vec<ChatMessage>,
    pub view: ViewModel,
    pub message_input: String,
    pub target_input: String,
    pub address_input: String,
    pub rename_input: String,
    /// Whether the message pane is anchored to its bottom edge.
    pub follow_messages: bool,
    /// Set when the identity was copied, for the transient confirmation.
    pub copied_at: Option<Instant>,
}

impl AppState {
    pub fn new(my_id: String) -> Self {
        Self {
            my_id,
            roster: Vec::new(),
            online: HashSet::new(),
            session: ChatSession::default(),
            messages: Vec::new(),
            view: ViewModel::default(),
            message_input: String::new(),
            target_input: String::new(),
            address_input: String::new(),
            rename_input: String::new(),
            follow_messages: true,
            copied_at: None,
        }
    }

    /// Replace the cached roster and online set and rebuild the view model.
    pub fn apply_node_state(&mut self, online: HashSet<String>, roster: Vec<PeerRecord>) {
        self.online = online;
        self.roster = roster;
        self.rebuild_view();
    }

    /// Apply a fetched history for `chat_id`. Stale responses (the user has
    /// moved on to another chat) are dropped, and identical content leaves
    /// the pane untouched so scroll position survives the poll.
    pub fn apply_messages(&mut self, chat_id: &str, messages: Vec<ChatMessage>) -> MessagesOutcome {
        if !self.session.is_active(chat_id) {
            return MessagesOutcome::StaleChat;
        }
        if self.messages == messages {
            return MessagesOutcome::Unchanged;
        }

        let new_arrivals = messages.len() > self.messages.len();
        self.messages = messages;
        MessagesOutcome::Updated { new_arrivals }
    }

    /// Local half of the selection transition: activate the chat, drop the
    /// previous pane content immediately, re-anchor to the bottom.
    pub fn select_chat(&mut self, target_id: &str) {
        self.session.select(target_id);
        self.messages.clear();
        self.follow_messages = true;
        self.rebuild_view();
    }

    fn rebuild_view(&mut self) {
        self.view = view::reconcile(&self.roster, &self.online, self.session.active_chat());
    }
}
