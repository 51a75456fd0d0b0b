use super::{load_settings, top_bar};
use crate::components::dialog::{show_dialog, Dialog};
use crate::components::settings::{show_settings_window, Settings, SettingsPage};
use crate::components::stat_card::show_stat_card;
use crate::metrics::{MetricsMonitor, StatKind};
use crate::netinfo::{self, IpInfo};
use log::error;

/// CPU, network and disk gauges plus the IP and adapter shortcuts.
pub struct SystemMonitorApp {
    settings: Settings,
    monitor: MetricsMonitor,
    dialog: Option<Dialog>,
}

impl SystemMonitorApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = load_settings(cc);
        Self {
            monitor: MetricsMonitor::with_sysinfo(
                settings.update_interval(),
                settings.history_length,
            ),
            settings,
            dialog: None,
        }
    }

    fn update_metrics(&mut self) {
        self.monitor.set_update_interval(self.settings.update_interval());
        self.monitor.set_history_len(self.settings.history_length);

        if self.monitor.should_update() {
            self.monitor.update();
        }
    }

    fn actions(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Schede di rete").clicked() {
                if let Err(e) = netinfo::open_network_adapters() {
                    error!("Opening network adapters failed: {e}");
                    self.dialog = Some(Dialog::error(
                        "Errore",
                        format!("Impossibile aprire le schede di rete: {e}"),
                    ));
                }
            }
            if ui.button("Mostra IP pubblico/privato").clicked() {
                let info = IpInfo::lookup();
                self.dialog = Some(Dialog::info("IP pubblico/privato", info.message()));
            }
        });
    }
}

impl eframe::App for SystemMonitorApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.settings);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.settings.apply(ctx);
        self.update_metrics();

        top_bar(ctx, &mut self.settings);
        show_settings_window(ctx, &mut self.settings, SettingsPage::Monitor);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Monitor di Sistema");
            });
            ui.add_space(8.0);
            self.actions(ui);
            ui.add_space(8.0);

            let history = self.monitor.cpu_history();
            let capacity = self.monitor.history_capacity();
            egui::ScrollArea::vertical().show(ui, |ui| {
                for readout in self.monitor.readouts() {
                    let plot = (readout.kind == StatKind::Cpu && self.monitor.is_available())
                        .then_some((history.as_slice(), capacity));
                    show_stat_card(ui, &readout, plot);
                }
            });
        });

        show_dialog(ctx, &mut self.dialog);

        ctx.request_repaint_after(self.monitor.time_until_update());
    }
}
