use std::collections::HashSet;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time;

use crate::common::{ApiCommand, ApiEvent, NodeState};

use super::client::NodeApi;

/// Roster/online-state poll period.
const STATE_POLL_INTERVAL: Duration = Duration::from_secs(2);
/// Active-conversation history poll period.
const MESSAGE_POLL_INTERVAL: Duration = Duration::from_secs(1);
/// Delay before the post-send state refresh, so unread counters settle.
const SEND_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Background task owning all node API traffic.
///
/// Two fixed-interval timers drive the polling; UI commands are executed in
/// arrival order between ticks. A failed poll degrades to an empty result
/// and the next tick is the retry.
pub struct ApiWorker {
    api: NodeApi,
    event_sender: mpsc::Sender<ApiEvent>,
    command_receiver: mpsc::Receiver<ApiCommand>,
    /// Clone handed to delayed self-scheduled refreshes.
    command_sender: mpsc::Sender<ApiCommand>,
    active_chat: Option<String>,
    /// user_ids seen in the last roster fetch; the selection transition uses
    /// this to decide whether a peer still needs registering.
    known_peers: HashSet<String>,
}

impl ApiWorker {
    pub fn new(
        api: NodeApi,
        event_sender: mpsc::Sender<ApiEvent>,
        command_receiver: mpsc::Receiver<ApiCommand>,
        command_sender: mpsc::Sender<ApiCommand>,
    ) -> Self {
        Self {
            api,
            event_sender,
            command_receiver,
            command_sender,
            active_chat: None,
            known_peers: HashSet::new(),
        }
    }

    pub async fn run(mut self) {
        let mut state_timer = time::interval(STATE_POLL_INTERVAL);
        let mut message_timer = time::interval(MESSAGE_POLL_INTERVAL);

        loop {
            tokio::select! {
                _ = state_timer.tick() => self.refresh_state().await,
                _ = message_timer.tick() => {
                    if let Some(chat_id) = self.active_chat.clone() {
                        self.fetch_messages(&chat_id).await;
                    }
                }
                command = self.command_receiver.recv() => match command {
                    Some(command) => {
                        if !self.handle_command(command).await {
                            break;
                        }
                    }
                    None => break,
                },
            }
        }
    }

    /// Returns false when the worker should shut down.
    async fn handle_command(&mut self, command: ApiCommand) -> bool {
        match command {
            ApiCommand::SelectChat { chat_id } => self.select_chat(chat_id).await,
            ApiCommand::SendMessage { target_id, text } => {
                self.send_message(&target_id, &text).await
            }
            ApiCommand::Rename { target_id, name } => {
                if let Err(err) = self.api.rename(&target_id, name.as_deref()).await {
                    log::warn!("Rename of {target_id} failed: {err}");
                }
                self.refresh_state().await;
            }
            ApiCommand::Connect { address } => {
                if let Err(err) = self.api.connect(&address).await {
                    log::warn!("Connect to {address} failed: {err}");
                }
                self.refresh_state().await;
            }
            ApiCommand::MarkRead { chat_id } => {
                if let Err(err) = self.api.read_chat(&chat_id).await {
                    log::warn!("read_chat for {chat_id} failed: {err}");
                }
            }
            ApiCommand::RefreshState => self.refresh_state().await,
            ApiCommand::Logout => {
                if let Err(err) = self.api.logout().await {
                    log::warn!("Logout request failed: {err}");
                }
                // The UI tears the session down regardless of the outcome.
                self.emit(ApiEvent::LoggedOut).await;
                return false;
            }
        }
        true
    }

    /// Selection transition. An id the roster does not know yet is first
    /// registered through a null rename and the roster re-fetched, so the
    /// sidebar shows the peer before its history is ever requested.
    async fn select_chat(&mut self, chat_id: String) {
        if !self.known_peers.contains(&chat_id) {
            if let Err(err) = self.api.rename(&chat_id, None).await {
                log::warn!("Failed to register peer {chat_id}: {err}");
            }
            self.refresh_state().await;
        }

        self.active_chat = Some(chat_id.clone());

        if let Err(err) = self.api.read_chat(&chat_id).await {
            log::warn!("read_chat for {chat_id} failed: {err}");
        }
        // Do not wait for the next poll tick.
        self.fetch_messages(&chat_id).await;
    }

    async fn send_message(&mut self, target_id: &str, text: &str) {
        if let Err(err) = self.api.send(target_id, text).await {
            log::warn!("Send to {target_id} failed: {err}");
        }

        self.fetch_messages(target_id).await;

        // Unread counters on the node settle shortly after a send; refresh
        // the full state once they have.
        let command_sender = self.command_sender.clone();
        tokio::spawn(async move {
            time::sleep(SEND_SETTLE_DELAY).await;
            let _ = command_sender.send(ApiCommand::RefreshState).await;
        });
    }

    async fn refresh_state(&mut self) {
        let state = match self.api.node_state().await {
            Ok(state) => state,
            Err(err) => {
                log::debug!("State poll failed: {err}");
                NodeState::default()
            }
        };
        let roster = match self.api.peers().await {
            Ok(roster) => roster,
            Err(err) => {
                log::debug!("Roster poll failed: {err}");
                Vec::new()
            }
        };

        self.known_peers = roster.iter().map(|peer| peer.user_id.clone()).collect();
        self.emit(ApiEvent::StateUpdated {
            online: state.peers.into_iter().collect(),
            roster,
        })
        .await;
    }

    async fn fetch_messages(&self, chat_id: &str) {
        let messages = match self.api.messages(chat_id).await {
            Ok(messages) => messages,
            Err(err) => {
                log::debug!("Message poll for {chat_id} failed: {err}");
                Vec::new()
            }
        };
        self.emit(ApiEvent::Messages {
            chat_id: chat_id.to_string(),
            messages,
        })
        .await;
    }

    async fn emit(&self, event: ApiEvent) {
        if self.event_sender.send(event).await.is_err() {
            log::warn!("UI event channel closed");
        }
    }
}
