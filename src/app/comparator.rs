use super::{load_settings, top_bar};
use crate::comparator::{
    load_or_bootstrap, AnimationConfig, ChartConfig, ChartState, FrameClock, PriceRecord,
};
use crate::components::bar_chart::show_bar_chart;
use crate::components::dialog::{show_dialog, Dialog};
use crate::components::price_list::PriceList;
use crate::components::settings::{show_settings_window, Settings, SettingsPage};
use log::{debug, error};
use std::path::Path;
use std::time::Instant;

/// Animated bar chart comparing the price ranges of a CSV file.
pub struct PriceComparatorApp {
    settings: Settings,
    /// `None` when the price file could not be loaded.
    chart: Option<ChartState>,
    price_list: PriceList,
    clock: FrameClock,
    dialog: Option<Dialog>,
}

impl PriceComparatorApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, path: impl AsRef<Path>) -> Self {
        let settings = load_settings(cc);
        let path = path.as_ref();

        match load_or_bootstrap(path) {
            Ok(records) => Self::with_records(settings, records),
            Err(e) => {
                error!("Loading {} failed: {e}", path.display());
                let mut app = Self::with_records(settings, Vec::new());
                app.chart = None;
                app.dialog = Some(Dialog::error(
                    "Errore",
                    format!("Impossibile leggere {}: {e}", path.display()),
                ));
                app
            }
        }
    }

    /// Starts with every product selected.
    fn with_records(settings: Settings, records: Vec<PriceRecord>) -> Self {
        let config = ChartConfig {
            animation: AnimationConfig {
                item_speed: settings.item_speed,
                scale_speed: settings.scale_speed,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut chart = ChartState::new(records, config);
        chart.set_all(true);

        Self {
            clock: FrameClock::new(config.animation.tick_interval()),
            chart: Some(chart),
            price_list: PriceList::default(),
            dialog: None,
            settings,
        }
    }

    fn advance_animation(&mut self) {
        let Some(chart) = self.chart.as_mut() else {
            return;
        };
        chart.set_speeds(self.settings.item_speed, self.settings.scale_speed);
        for _ in 0..self.clock.due_ticks(Instant::now()) {
            chart.tick();
        }
    }
}

impl eframe::App for PriceComparatorApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.settings);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.settings.apply(ctx);
        self.advance_animation();

        top_bar(ctx, &mut self.settings);
        show_settings_window(ctx, &mut self.settings, SettingsPage::Comparator);

        if let Some(chart) = self.chart.as_mut() {
            egui::SidePanel::left("price_list")
                .resizable(true)
                .default_width(220.0)
                .show(ctx, |ui| {
                    ui.heading("Prodotti");
                    if self.price_list.show(ui, chart) {
                        debug!("Selection now {} products", chart.active().len());
                        ctx.request_repaint();
                    }
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Confronto prezzi");
            match self.chart.as_mut() {
                Some(chart) if chart.records().is_empty() => {
                    ui.label("Nessun prodotto valido nel file.");
                }
                Some(chart) => show_bar_chart(ui, chart),
                None => {}
            }
        });

        // Without data the app cannot run; dismissing the error closes it.
        if show_dialog(ctx, &mut self.dialog) && self.chart.is_none() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        ctx.request_repaint_after(self.clock.interval());
    }
}
