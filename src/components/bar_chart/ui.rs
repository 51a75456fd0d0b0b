use crate::comparator::{build_scene, BarSegment, ChartState, Primitive, TextRole};
use crate::components::stat_card::ACCENT;
use egui::{Color32, FontId, Stroke};

const BASE_FILL: Color32 = Color32::from_rgb(0x2f, 0x5d, 0x8a);

/// Paints the chart into all the space left in `ui`.
///
/// The canvas height feeds back into the chart layout so parking and entry
/// positions follow window resizes.
pub fn show_bar_chart(ui: &mut egui::Ui, chart: &mut ChartState) {
    let size = ui.available_size();
    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
    let rect = response.rect;
    chart.set_visible_height(rect.height() as f64);

    let scene = build_scene(chart, rect.width());
    let origin = rect.min.to_vec2();
    let visuals = ui.visuals();
    let grid_stroke = Stroke::new(1.0, visuals.weak_text_color().gamma_multiply(0.4));
    let axis_stroke = Stroke::new(1.5, visuals.text_color());

    for primitive in &scene.primitives {
        match primitive {
            Primitive::Axis { from, to } => {
                painter.line_segment([*from + origin, *to + origin], axis_stroke);
            }
            Primitive::GridLine { from, to } => {
                painter.line_segment([*from + origin, *to + origin], grid_stroke);
            }
            Primitive::Bar { rect: bar, segment } => {
                let fill = match segment {
                    BarSegment::Base => BASE_FILL,
                    BarSegment::Range => ACCENT,
                };
                painter.rect_filled(bar.translate(origin), 3.0, fill);
            }
            Primitive::Text {
                pos,
                anchor,
                text,
                role,
            } => {
                let (font, color) = match role {
                    TextRole::Name => (FontId::proportional(14.0), visuals.strong_text_color()),
                    TextRole::Value => (FontId::proportional(12.0), visuals.text_color()),
                    TextRole::Scale => (FontId::proportional(11.0), visuals.weak_text_color()),
                };
                painter.text(*pos + origin, *anchor, text, font, color);
            }
        }
    }
}
