use serde_json::json;

use crate::common::{ChatMessage, NodeState, PeerRecord};

/// Thin wrapper over the node's local HTTP API.
pub struct NodeApi {
    http: reqwest::Client,
    base: String,
}

impl NodeApi {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into(),
        }
    }

    /// Global node state; yields the set of currently reachable peers.
    pub async fn node_state(&self) -> reqwest::Result<NodeState> {
        self.http
            .get(format!("{}/api/state", self.base))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// Roster of known peers with nicknames and unread counters.
    pub async fn peers(&self) -> reqwest::Result<Vec<PeerRecord>> {
        self.http
            .get(format!("{}/api/peers", self.base))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// Ordered history of one conversation.
    pub async fn messages(&self, chat_id: &str) -> reqwest::Result<Vec<ChatMessage>> {
        self.http
            .get(format!("{}/api/messages/{}", self.base, chat_id))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    pub async fn send(&self, target_id: &str, text: &str) -> reqwest::Result<()> {
        self.post("/api/send", json!({ "target_id": target_id, "text": text }))
            .await
    }

    /// A `None` name clears the nickname; the node also uses it to register
    /// a peer it has not seen before.
    pub async fn rename(&self, target_id: &str, name: Option<&str>) -> reqwest::Result<()> {
        self.post("/api/rename", json!({ "target_id": target_id, "name": name }))
            .await
    }

    pub async fn read_chat(&self, chat_id: &str) -> reqwest::Result<()> {
        self.post("/api/read_chat", json!({ "chat_id": chat_id }))
            .await
    }

    pub async fn connect(&self, address: &str) -> reqwest::Result<()> {
        self.post("/api/connect", json!({ "address": address }))
            .await
    }

    pub async fn logout(&self) -> reqwest::Result<()> {
        self.http
            .post(format!("{}/api/logout", self.base))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> reqwest::Result<()> {
        self.http
            .post(format!("{}{}", self.base, path))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
