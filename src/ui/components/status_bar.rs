use std::time::Duration;

use eframe::egui;

use crate::ui::state::AppState;
use crate::ui::view::truncate_id;

/// How long the "copied" confirmation stays on screen.
const COPY_FEEDBACK: Duration = Duration::from_millis(1500);

#[derive(Default)]
pub struct StatusBarActions {
    pub copy_identity: bool,
    pub logout: bool,
}

pub fn render(ui: &mut egui::Ui, state: &AppState) -> StatusBarActions {
    let mut actions = StatusBarActions::default();

    ui.horizontal(|ui| {
        ui.label(format!("NEIGHBORS: {}", state.view.neighbor_count));
        ui.separator();

        let copied = state
            .copied_at
            .is_some_and(|at| at.elapsed() < COPY_FEEDBACK);
        let id_label = if copied {
            egui::RichText::new("Copied to clipboard").color(egui::Color32::GREEN)
        } else {
            egui::RichText::new(format!(
                "ID: {}... (click to copy)",
                truncate_id(&state.my_id, 16)
            ))
            .weak()
        };
        if ui
            .add(egui::Label::new(id_label).sense(egui::Sense::click()))
            .clicked()
        {
            actions.copy_identity = true;
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Log out").clicked() {
                actions.logout = true;
            }
            ui.colored_label(egui::Color32::GREEN, "NODE: ACTIVE");
        });
    });

    actions
}
