//! Top bar, settings sidebar, and status bar rendering.

use super::super::DraftpadApp;
use eframe::egui::{self, RichText};

impl DraftpadApp {
    pub(crate) fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Draftpad");
                    ui.add_space(12.0);
                    ui.label(
                        RichText::new(format!("http://{}", self.server_addr))
                            .monospace()
                            .weak(),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let can_save = self.store.is_dirty() && !self.save_in_flight;
                        if ui
                            .add_enabled(can_save, egui::Button::new("Save"))
                            .clicked()
                        {
                            self.save_now();
                        }
                    });
                });
            });
    }

    pub(crate) fn render_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("settings_sidebar")
            .default_width(300.0)
            .show(ctx, |ui| {
                ui.heading("Settings");
                ui.separator();

                ui.label(RichText::new("Type").small().weak());
                ui.label(self.store.post().post_type.clone());
                ui.add_space(8.0);

                self.page_attributes.show(ui, &mut self.store);
            });
    }

    pub(crate) fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let state = if self.save_in_flight {
                        "Saving…"
                    } else if self.store.is_dirty() {
                        "Unsaved changes"
                    } else {
                        "Saved"
                    };
                    ui.label(RichText::new(state).weak());
                    if let Some(status) = &self.status {
                        ui.separator();
                        ui.label(status.text.clone());
                    }
                });
            });
    }
}
