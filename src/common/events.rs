use std::collections::HashSet;

use super::types::{ChatMessage, PeerRecord};

/// Events the API worker sends up to the UI.
#[derive(Debug, Clone)]
pub enum ApiEvent {
    /// One state-poll tick: the online set and the roster, fetched together.
    StateUpdated {
        online: HashSet<String>,
        roster: Vec<PeerRecord>,
    },
    /// History fetched for `chat_id`. The UI drops the event if that chat is
    /// no longer the active one by the time the response lands.
    Messages {
        chat_id: String,
        messages: Vec<ChatMessage>,
    },
    /// Logout completed (or was attempted); the session is over either way.
    LoggedOut,
}
