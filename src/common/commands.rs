/// Commands the UI sends down to the API worker.
#[derive(Debug, Clone)]
pub enum ApiCommand {
    /// Full selection transition: register the peer if the roster does not
    /// know it yet, mark the conversation read, fetch its history.
    SelectChat { chat_id: String },
    SendMessage { target_id: String, text: String },
    /// Set or clear a nickname. A `None` name is also how an unseen peer
    /// gets registered with the node.
    Rename {
        target_id: String,
        name: Option<String>,
    },
    /// Ask the node to dial a peer address.
    Connect { address: String },
    /// Issued when displayed history grows while the chat is on screen.
    MarkRead { chat_id: String },
    RefreshState,
    Logout,
}
