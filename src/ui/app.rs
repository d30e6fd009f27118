use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{ApiCommand, ApiEvent};
use crate::storage::IdentityStore;

use super::components::{
    chat_area, input_bar,
    sidebar::{self, SidebarActions},
    status_bar,
};
use super::state::{AppState, MessagesOutcome};

pub struct ChatApp {
    state: AppState,
    identity_store: IdentityStore,
    command_sender: mpsc::Sender<ApiCommand>,
    event_receiver: mpsc::Receiver<ApiEvent>,
}

impl ChatApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        identity: String,
        identity_store: IdentityStore,
        command_sender: mpsc::Sender<ApiCommand>,
        event_receiver: mpsc::Receiver<ApiEvent>,
    ) -> Self {
        Self {
            state: AppState::new(identity),
            identity_store,
            command_sender,
            event_receiver,
        }
    }

    fn handle_api_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.event_receiver.try_recv() {
            match event {
                ApiEvent::StateUpdated { online, roster } => {
                    self.state.apply_node_state(online, roster);
                }
                ApiEvent::Messages { chat_id, messages } => {
                    let outcome = self.state.apply_messages(&chat_id, messages);
                    // Displayed history grew while the chat is on screen:
                    // tell the node it has been read so the counter does not
                    // climb behind the user's back.
                    if let MessagesOutcome::Updated { new_arrivals: true } = outcome {
                        self.send_command(ApiCommand::MarkRead { chat_id });
                    }
                }
                ApiEvent::LoggedOut => {
                    if let Err(err) = self.identity_store.clear() {
                        log::warn!("Failed to clear stored identity: {err}");
                    }
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
        }
    }

    fn send_command(&mut self, command: ApiCommand) {
        if let Err(err) = self.command_sender.try_send(command) {
            log::warn!("Failed to send command to API worker: {err}");
        }
    }

    fn select_chat(&mut self, target_id: String) {
        let target_id = target_id.trim().to_string();
        if target_id.is_empty() {
            return;
        }
        self.state.select_chat(&target_id);
        self.send_command(ApiCommand::SelectChat { chat_id: target_id });
    }

    fn send_message(&mut self, text: String) {
        // No active chat: drop silently.
        let Some(target_id) = self.state.session.active_chat().map(str::to_string) else {
            return;
        };
        self.send_command(ApiCommand::SendMessage { target_id, text });
    }

    fn rename_active_chat(&mut self) {
        let Some(target_id) = self.state.session.active_chat().map(str::to_string) else {
            return;
        };
        let name = self.state.rename_input.trim().to_string();
        if name.is_empty() {
            return;
        }
        self.state.rename_input.clear();
        self.send_command(ApiCommand::Rename {
            target_id,
            name: Some(name),
        });
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_api_events(ctx);

        egui::TopBottomPanel::top("status_bar").show(ctx, |ui| {
            let actions = status_bar::render(ui, &self.state);
            if actions.copy_identity {
                ctx.copy_text(self.state.my_id.clone());
                self.state.copied_at = Some(std::time::Instant::now());
            }
            if actions.logout {
                self.send_command(ApiCommand::Logout);
            }
        });

        egui::SidePanel::left("peer_sidebar")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                let actions: SidebarActions = sidebar::render(ui, &mut self.state);
                if let Some(address) = actions.connect_address {
                    self.send_command(ApiCommand::Connect { address });
                }
                if let Some(target_id) = actions.start_chat_id {
                    self.select_chat(target_id);
                }
                if let Some(target_id) = actions.selected_peer {
                    self.select_chat(target_id);
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.session.active_chat().is_none() {
                ui.centered_and_justified(|ui| {
                    ui.label(egui::RichText::new("Select a peer to start chatting").weak());
                });
                return;
            }

            let title = self.state.view.active_chat_title.clone().unwrap_or_default();
            let mut rename_clicked = false;
            ui.horizontal(|ui| {
                ui.heading(format!("Chat with: {title}"));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Rename").clicked() {
                        rename_clicked = true;
                    }
                    ui.add(
                        egui::TextEdit::singleline(&mut self.state.rename_input)
                            .hint_text("New name"),
                    );
                });
            });
            if rename_clicked {
                self.rename_active_chat();
            }
            ui.separator();

            egui::TopBottomPanel::bottom("message_input")
                .show_inside(ui, |ui| {
                    if let Some(text) = input_bar::render(ui, &mut self.state.message_input) {
                        self.send_message(text);
                    }
                });

            chat_area::render(
                ui,
                &self.state.messages,
                &mut self.state.follow_messages,
            );
        });

        ctx.request_repaint();
    }
}
