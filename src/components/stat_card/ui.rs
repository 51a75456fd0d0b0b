use crate::metrics::StatReadout;
use egui::Vec2;

const CARD_FILL: egui::Color32 = egui::Color32::from_rgb(0x2a, 0x2a, 0x2a);
const CARD_TEXT: egui::Color32 = egui::Color32::from_rgb(0xea, 0xea, 0xea);
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(0x4a, 0xa3, 0xff);

/// Titled card with the readout text, a progress bar and an optional sparkline.
pub fn show_stat_card(ui: &mut egui::Ui, readout: &StatReadout, history: Option<(&[f32], usize)>) {
    egui::Frame::none()
        .fill(CARD_FILL)
        .rounding(6.0)
        .inner_margin(egui::Margin::symmetric(12.0, 10.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                egui::RichText::new(readout.kind.title())
                    .strong()
                    .color(CARD_TEXT),
            );
            ui.add_space(4.0);
            ui.label(egui::RichText::new(&readout.text).color(CARD_TEXT));
            ui.add_space(6.0);
            ui.add(egui::ProgressBar::new(readout.fraction()).fill(ACCENT));

            if let Some((samples, max_points)) = history {
                if !samples.is_empty() {
                    ui.add_space(6.0);
                    history_plot(ui, ("history", readout.kind.title()), 60.0, samples, max_points);
                }
            }
        });
    ui.add_space(8.0);
}

fn history_plot(
    ui: &mut egui::Ui,
    id: impl std::hash::Hash,
    height: f32,
    history: &[f32],
    max_points: usize,
) {
    let plot = egui_plot::Plot::new(id)
        .height(height)
        .show_axes([false, true])
        .set_margin_fraction(Vec2::ZERO)
        .include_x(0.0)
        .include_x(max_points as f64)
        .include_y(0.0)
        .include_y(100.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false);

    plot.show(ui, |plot_ui| {
        let points: egui_plot::PlotPoints = history
            .iter()
            .enumerate()
            .map(|(i, &v)| [i as f64, v as f64])
            .collect();
        plot_ui.line(egui_plot::Line::new(points).color(ACCENT));
    });
}
