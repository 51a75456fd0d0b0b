use super::state::PriceList;
use crate::comparator::ChartState;
use crate::format::price_label;

impl PriceList {
    /// Checklist of products; returns `true` when the selection changed.
    pub fn show(&mut self, ui: &mut egui::Ui, chart: &mut ChartState) -> bool {
        let mut changed = false;

        ui.horizontal(|ui| {
            if ui.button("Tutti").clicked() {
                chart.set_all(true);
                changed = true;
            }
            if ui.button("Nessuno").clicked() {
                chart.set_all(false);
                changed = true;
            }
        });

        ui.horizontal(|ui| {
            ui.label("Cerca:");
            let response = ui.text_edit_singleline(&mut self.search);
            if ui.small_button("❌").clicked() {
                self.search.clear();
            }
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                self.search.clear();
            }
        });
        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for idx in 0..chart.records().len() {
                    let record = &chart.records()[idx];
                    if !self.matches(&record.name) {
                        continue;
                    }
                    let hover = format!("{} – {}", price_label(record.min), price_label(record.max));
                    let mut checked = chart.is_checked(idx);
                    if ui
                        .checkbox(&mut checked, record.name.as_str())
                        .on_hover_text(hover)
                        .changed()
                    {
                        chart.set_checked(idx, checked);
                        changed = true;
                    }
                }
            });

        changed
    }
}
