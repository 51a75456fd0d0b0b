use super::state::{Settings, SettingsPage};

pub fn show_settings_window(ctx: &egui::Context, settings: &mut Settings, page: SettingsPage) {
    if !settings.is_visible() {
        return;
    }

    egui::Window::new("⚙ Impostazioni")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Scala UI:");
                ui.add(
                    egui::Slider::new(&mut settings.scale, 0.5..=2.0)
                        .step_by(0.1)
                );
            });

            ui.horizontal(|ui| {
                ui.label("Dimensione testo:");
                ui.add(
                    egui::Slider::new(&mut settings.font_size, 8.0..=32.0)
                        .step_by(1.0)
                );
            });

            ui.separator();

            match page {
                SettingsPage::Monitor => {
                    ui.horizontal(|ui| {
                        ui.label("Aggiornamento:");
                        ui.add(
                            egui::Slider::new(&mut settings.update_interval_ms, 250..=5000)
                                .step_by(250.0)
                                .suffix(" ms")
                        );
                    });
                    ui.horizontal(|ui| {
                        ui.label("Storico CPU:");
                        ui.add(
                            egui::Slider::new(&mut settings.history_length, 10..=300)
                                .suffix(" campioni")
                        );
                    });
                }
                SettingsPage::Comparator => {
                    ui.horizontal(|ui| {
                        ui.label("Velocità barre:");
                        ui.add(egui::Slider::new(&mut settings.item_speed, 0.01..=0.5));
                    });
                    ui.horizontal(|ui| {
                        ui.label("Velocità scala:");
                        ui.add(egui::Slider::new(&mut settings.scale_speed, 0.01..=0.5));
                    });
                }
            }

            ui.separator();

            if ui.button("Chiudi").clicked() {
                settings.hide();
            }
        });
}
