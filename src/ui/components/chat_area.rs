use eframe::egui;

use crate::common::ChatMessage;

/// How close to the bottom edge still counts as "following" the chat.
const BOTTOM_TOLERANCE: f32 = 50.0;

/// True when the pane is scrolled to within [`BOTTOM_TOLERANCE`] of its
/// bottom. New content re-anchors the view only in that case; a user reading
/// older history keeps their scroll offset.
pub fn near_bottom(offset_y: f32, content_height: f32, viewport_height: f32) -> bool {
    content_height - offset_y <= viewport_height + BOTTOM_TOLERANCE
}

pub fn render(ui: &mut egui::Ui, messages: &[ChatMessage], follow: &mut bool) {
    let output = egui::ScrollArea::vertical()
        .id_salt("message_pane")
        .auto_shrink([false, false])
        .stick_to_bottom(*follow)
        .show(ui, |ui| {
            for message in messages {
                message_row(ui, message);
            }
        });

    *follow = near_bottom(
        output.state.offset.y,
        output.content_size.y,
        output.inner_rect.height(),
    );
}

fn message_row(ui: &mut egui::Ui, message: &ChatMessage) {
    let align = if message.is_outgoing {
        egui::Align::Max
    } else {
        egui::Align::Min
    };

    ui.with_layout(egui::Layout::top_down(align), |ui| {
        ui.label(&message.content);

        let mut stamp = message.display_time();
        if message.is_outgoing {
            stamp.push_str(" ✓");
        }
        ui.label(egui::RichText::new(stamp).weak().small());
        ui.add_space(4.0);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_the_bottom_counts_as_near() {
        // content 1000, viewport 300, fully scrolled: offset 700
        assert!(near_bottom(700.0, 1000.0, 300.0));
    }

    #[test]
    fn within_tolerance_counts_as_near() {
        assert!(near_bottom(650.0, 1000.0, 300.0));
    }

    #[test]
    fn just_past_tolerance_does_not() {
        assert!(!near_bottom(649.0, 1000.0, 300.0));
    }

    #[test]
    fn short_content_is_always_near_the_bottom() {
        assert!(near_bottom(0.0, 100.0, 300.0));
    }
}
