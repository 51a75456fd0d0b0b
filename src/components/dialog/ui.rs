use super::state::{Dialog, DialogKind};

/// Shows `dialog` centred over the window; clears it and returns `true` once
/// the user presses OK.
pub fn show_dialog(ctx: &egui::Context, dialog: &mut Option<Dialog>) -> bool {
    let Some(current) = dialog.as_ref() else {
        return false;
    };

    let mut dismissed = false;
    egui::Window::new(current.title.as_str())
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            match current.kind {
                DialogKind::Error => {
                    ui.colored_label(ui.visuals().error_fg_color, &current.body);
                }
                DialogKind::Info => {
                    ui.label(&current.body);
                }
            }
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        *dialog = None;
    }
    dismissed
}
