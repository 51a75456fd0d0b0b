use std::time::Duration;

/// Which groups of options the settings window offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsPage {
    Monitor,
    Comparator,
}

/// User preferences, persisted through eframe storage.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub scale: f32,
    pub font_size: f32,
    pub update_interval_ms: u64,
    pub history_length: usize,
    pub item_speed: f64,
    pub scale_speed: f64,
    #[serde(skip)]
    show_window: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scale: 1.2,
            font_size: 15.0,
            update_interval_ms: 1000,
            history_length: 60,
            item_speed: 0.15,
            scale_speed: 0.05,
            show_window: false,
        }
    }
}

impl Settings {
    pub fn show(&mut self) {
        self.show_window = true;
    }

    pub fn is_visible(&self) -> bool {
        self.show_window
    }

    pub fn hide(&mut self) {
        self.show_window = false;
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms.max(100))
    }

    pub fn apply(&self, ctx: &egui::Context) {
        ctx.set_pixels_per_point(self.scale);

        let mut style = (*ctx.style()).clone();
        style.text_styles = [
            (
                egui::TextStyle::Heading,
                egui::FontId::new(self.font_size + 4.0, egui::FontFamily::Proportional),
            ),
            (
                egui::TextStyle::Body,
                egui::FontId::new(self.font_size, egui::FontFamily::Proportional),
            ),
            (
                egui::TextStyle::Monospace,
                egui::FontId::new(self.font_size, egui::FontFamily::Monospace),
            ),
            (
                egui::TextStyle::Button,
                egui::FontId::new(self.font_size, egui::FontFamily::Proportional),
            ),
            (
                egui::TextStyle::Small,
                egui::FontId::new(self.font_size - 2.0, egui::FontFamily::Proportional),
            ),
        ]
        .into();
        ctx.set_style(style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn old_state_gets_new_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"scale": 1.5}"#).unwrap();
        assert_eq!(settings.scale, 1.5);
        assert_eq!(settings.item_speed, 0.15);
        assert!(!settings.is_visible());
    }

    #[test]
    fn poll_interval_has_a_floor() {
        let settings = Settings {
            update_interval_ms: 5,
            ..Default::default()
        };
        assert_eq!(settings.update_interval(), Duration::from_millis(100));
    }
}
