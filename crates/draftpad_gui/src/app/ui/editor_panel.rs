//! Central editor pane for title and content.

use super::super::DraftpadApp;
use draftpad_core::models::post::UpdatePostRequest;
use draftpad_core::store::ActionDispatcher;
use eframe::egui;

impl DraftpadApp {
    pub(crate) fn render_editor_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if ui
                .add(
                    egui::TextEdit::singleline(&mut self.title_draft)
                        .hint_text("Add title")
                        .desired_width(f32::INFINITY),
                )
                .changed()
            {
                self.store.edit_post(UpdatePostRequest {
                    title: Some(self.title_draft.clone()),
                    ..Default::default()
                });
            }

            ui.add_space(8.0);
            egui::ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
                if ui
                    .add(
                        egui::TextEdit::multiline(&mut self.content_draft)
                            .hint_text("Start writing.")
                            .desired_width(f32::INFINITY)
                            .desired_rows(24),
                    )
                    .changed()
                {
                    self.store.edit_post(UpdatePostRequest {
                        content: Some(self.content_draft.clone()),
                        ..Default::default()
                    });
                }
            });
        });
    }
}
