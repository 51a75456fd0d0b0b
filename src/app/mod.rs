mod comparator;
mod monitor;

pub use comparator::PriceComparatorApp;
pub use monitor::SystemMonitorApp;

use crate::components::settings::Settings;

/// Restores persisted settings, if any.
/// Note that the `persistence` feature must be enabled for this to work.
fn load_settings(cc: &eframe::CreationContext<'_>) -> Settings {
    cc.storage
        .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
        .unwrap_or_default()
}

fn top_bar(ctx: &egui::Context, settings: &mut Settings) {
    egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Esci").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.add_space(16.0);
            egui::widgets::global_theme_preference_buttons(ui);

            ui.add_space(16.0);
            if ui.button("⚙").clicked() {
                settings.show();
            }
        });
    });
}
