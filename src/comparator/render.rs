use super::ChartState;
use crate::format::{price_label, scale_label};
use egui::{pos2, Align2, Pos2, Rect};

/// Number of gridlines drawn right of the axis.
pub const GRID_STEPS: usize = 5;

/// Bars whose eased maximum is below this share of the axis are not drawn.
const MIN_VISIBLE_FRACTION: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarSegment {
    /// `[0, min]`
    Base,
    /// `[min, max]`
    Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Name,
    Value,
    Scale,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Axis { from: Pos2, to: Pos2 },
    GridLine { from: Pos2, to: Pos2 },
    Bar { rect: Rect, segment: BarSegment },
    Text {
        pos: Pos2,
        anchor: Align2,
        text: String,
        role: TextRole,
    },
}

/// Everything the chart needs to paint one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub primitives: Vec<Primitive>,
}

impl Scene {
    pub fn bars(&self) -> impl Iterator<Item = (&Rect, BarSegment)> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Bar { rect, segment } => Some((rect, *segment)),
            _ => None,
        })
    }

    pub fn texts(&self, role: TextRole) -> impl Iterator<Item = &str> {
        self.primitives.iter().filter_map(move |p| match p {
            Primitive::Text { text, role: r, .. } if *r == role => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Computes the draw primitives for the current animation frame.
///
/// Coordinates are relative to the canvas origin; `width` is the canvas width
/// and the height comes from the chart layout.
pub fn build_scene(chart: &ChartState, width: f32) -> Scene {
    let layout = chart.config().layout;
    let height = layout.visible_height;
    let scale = chart.scale().current_max.max(f64::EPSILON);

    let plot_left = layout.margin_left;
    let plot_right = (width as f64 - layout.margin_right).max(plot_left + 1.0);
    let plot_width = plot_right - plot_left;
    let x_of = |value: f64| (plot_left + (value / scale).clamp(0.0, 1.0) * plot_width) as f32;

    let top = (layout.margin_top * 0.5) as f32;
    let bottom = height as f32;
    let mut primitives = Vec::with_capacity(2 * GRID_STEPS + 4 * chart.active().len() + 2);

    for step in 1..=GRID_STEPS {
        let value = scale * step as f64 / GRID_STEPS as f64;
        let x = x_of(value);
        primitives.push(Primitive::GridLine {
            from: pos2(x, top),
            to: pos2(x, bottom),
        });
        primitives.push(Primitive::Text {
            pos: pos2(x, top),
            anchor: Align2::CENTER_BOTTOM,
            text: scale_label(value),
            role: TextRole::Scale,
        });
    }
    primitives.push(Primitive::Axis {
        from: pos2(plot_left as f32, top),
        to: pos2(plot_left as f32, bottom),
    });

    for (idx, record) in chart.records().iter().enumerate() {
        let Some(state) = chart.state(idx) else {
            continue;
        };
        if state.current_y >= height || state.current_max < scale * MIN_VISIBLE_FRACTION {
            continue;
        }

        let y0 = state.current_y as f32;
        let y1 = (state.current_y + layout.bar_height) as f32;
        let mid = (y0 + y1) * 0.5;
        let x_min = x_of(state.current_min);
        let x_max = x_of(state.current_max);

        if x_min > plot_left as f32 {
            primitives.push(Primitive::Bar {
                rect: Rect::from_min_max(pos2(plot_left as f32, y0), pos2(x_min, y1)),
                segment: BarSegment::Base,
            });
        }
        primitives.push(Primitive::Bar {
            rect: Rect::from_min_max(pos2(x_min, y0), pos2(x_max, y1)),
            segment: BarSegment::Range,
        });
        primitives.push(Primitive::Text {
            pos: pos2(plot_left as f32 - 8.0, mid),
            anchor: Align2::RIGHT_CENTER,
            text: record.name.clone(),
            role: TextRole::Name,
        });
        primitives.push(Primitive::Text {
            pos: pos2(x_max + 8.0, mid),
            anchor: Align2::LEFT_CENTER,
            text: format!("{} – {}", price_label(record.min), price_label(record.max)),
            role: TextRole::Value,
        });
    }

    Scene { primitives }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::{ChartConfig, PriceRecord};

    fn settled_chart(checked: &[bool]) -> ChartState {
        let records = vec![
            PriceRecord::new("acqua", 0.20, 1.50),
            PriceRecord::new("latte", 0.90, 2.20),
            PriceRecord::new("benzina", 1.586, 2.158),
        ];
        let mut chart = ChartState::new(records, ChartConfig::default());
        chart.set_selection(checked);
        for _ in 0..500 {
            chart.tick();
        }
        chart
    }

    #[test]
    fn empty_selection_draws_only_axis_and_grid() {
        let chart = settled_chart(&[false, false, false]);
        let scene = build_scene(&chart, 800.0);

        assert_eq!(scene.bars().count(), 0);
        assert_eq!(scene.texts(TextRole::Name).count(), 0);
        let labels: Vec<_> = scene.texts(TextRole::Scale).collect();
        assert_eq!(labels, ["2,00", "4,00", "6,00", "8,00", "10,00"]);
    }

    #[test]
    fn active_bars_have_two_segments_and_labels() {
        let chart = settled_chart(&[true, true, true]);
        let scene = build_scene(&chart, 800.0);

        let names: Vec<_> = scene.texts(TextRole::Name).collect();
        assert_eq!(names, ["acqua", "latte", "benzina"]);
        assert_eq!(scene.bars().filter(|(_, s)| *s == BarSegment::Base).count(), 3);
        assert_eq!(scene.bars().filter(|(_, s)| *s == BarSegment::Range).count(), 3);
        assert!(scene
            .texts(TextRole::Value)
            .any(|t| t == "0,90 € – 2,20 €"));
    }

    #[test]
    fn range_segment_starts_where_base_ends() {
        let chart = settled_chart(&[false, true, false]);
        let scene = build_scene(&chart, 800.0);

        let base = scene.bars().find(|(_, s)| *s == BarSegment::Base).unwrap().0;
        let range = scene.bars().find(|(_, s)| *s == BarSegment::Range).unwrap().0;
        assert_eq!(base.max.x, range.min.x);
        assert!(range.max.x > range.min.x);
        assert!((base.min.y - 40.0).abs() < 1e-2);
    }

    #[test]
    fn freshly_selected_bar_is_skipped_until_it_grows() {
        let mut chart = settled_chart(&[false, false, false]);
        chart.set_checked(2, true);
        assert_eq!(build_scene(&chart, 800.0).bars().count(), 0);

        chart.tick();
        assert!(build_scene(&chart, 800.0).bars().count() > 0);
    }

    #[test]
    fn bars_below_visible_area_are_skipped() {
        let mut chart = settled_chart(&[true, true, true]);
        chart.set_visible_height(60.0);
        let scene = build_scene(&chart, 800.0);

        let names: Vec<_> = scene.texts(TextRole::Name).collect();
        assert_eq!(names, ["latte"]);
    }
}
