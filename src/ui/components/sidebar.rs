use eframe::egui;

use crate::ui::state::AppState;
use crate::ui::view::PeerEntry;

const BADGE_COLOR: egui::Color32 = egui::Color32::from_rgb(230, 57, 70);

#[derive(Default)]
pub struct SidebarActions {
    pub connect_address: Option<String>,
    pub start_chat_id: Option<String>,
    pub selected_peer: Option<String>,
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) -> SidebarActions {
    let mut actions = SidebarActions::default();

    ui.heading("Peers");
    ui.separator();

    // Manual node connect section
    ui.label("Connect to node:");
    ui.horizontal(|ui| {
        ui.text_edit_singleline(&mut state.address_input);
        if ui.button("Connect").clicked() {
            if !state.address_input.trim().is_empty() {
                let address = state.address_input.trim().to_string();
                state.address_input.clear();
                actions.connect_address = Some(address);
            }
        }
    });

    ui.separator();
    ui.label("Start chat (user id):");
    ui.horizontal(|ui| {
        ui.text_edit_singleline(&mut state.target_input);
        if ui.button("Chat").clicked() {
            if !state.target_input.trim().is_empty() {
                actions.start_chat_id = Some(state.target_input.trim().to_string());
                state.target_input.clear();
            }
        }
    });

    ui.separator();

    if state.view.peers.is_empty() {
        ui.label("No peers known yet");
        return actions;
    }

    for entry in &state.view.peers {
        if peer_row(ui, entry).clicked() {
            actions.selected_peer = Some(entry.user_id.clone());
        }
    }

    actions
}

fn peer_row(ui: &mut egui::Ui, entry: &PeerEntry) -> egui::Response {
    ui.horizontal(|ui| {
        let color = if entry.online {
            egui::Color32::GREEN
        } else {
            egui::Color32::GRAY
        };
        ui.colored_label(color, if entry.online { "●" } else { "○" });

        let response = ui.vertical(|ui| {
            let response = ui.selectable_label(entry.active, entry.display_name.as_str());
            ui.label(egui::RichText::new(entry.short_id.as_str()).weak().small());
            response
        });

        if let Some(count) = entry.unread_badge {
            ui.label(
                egui::RichText::new(format!(" {count} "))
                    .small()
                    .color(egui::Color32::WHITE)
                    .background_color(BADGE_COLOR),
            );
        }

        response.inner
    })
    .inner
}
