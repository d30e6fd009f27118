use eframe::egui;

/// Message input row. Returns the trimmed text on submit; whitespace-only
/// input is swallowed so an accidental Enter sends nothing.
pub fn render(ui: &mut egui::Ui, input_text: &mut String) -> Option<String> {
    let mut submit = false;
    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(input_text)
                .hint_text("Type a message")
                .desired_width(ui.available_width() - 60.0),
        );
        if ui.button("Send").clicked() {
            submit = true;
        }

        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            submit = true;
            // Keep the caret in the field for the next message.
            response.request_focus();
        }
    });

    if !submit {
        return None;
    }

    let text = input_text.trim().to_string();
    input_text.clear();
    if text.is_empty() { None } else { Some(text) }
}
