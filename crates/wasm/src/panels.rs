//! UI panel rendering for WasmApp

use chrono::Utc;
use eframe::egui;
use egui_phosphor::regular;
use playdeck_core::{
    render_account_button, render_auth_modal, render_category_bar, render_game_grid,
    render_search_bar, LoadOrigin,
};

use crate::app::WasmApp;

impl WasmApp {
    // ========================================================================
    // Top Panel
    // ========================================================================

    pub fn render_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(format!("{} PlayDeck", regular::GAME_CONTROLLER));
                ui.separator();

                if self.store.is_loading() {
                    ui.spinner();
                }
                match self.store.origin() {
                    Some(LoadOrigin::Fallback) => {
                        ui.colored_label(egui::Color32::YELLOW, format!("{} {}", regular::WARNING, self.status));
                    }
                    _ => {
                        let label = ui.label(&self.status);
                        if let Some(report) = self.store.report().filter(|r| !r.skipped.is_empty()) {
                            let lines: Vec<String> =
                                report.skipped.iter().map(|row| format!("line {}: {}", row.line, row.reason)).collect();
                            label.on_hover_text(format!(
                                "{} of {} rows skipped\n{}",
                                report.skipped.len(),
                                report.rows_seen,
                                lines.join("\n")
                            ));
                        }
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if render_account_button(ui, self.current_user.as_ref()) {
                        self.account_clicked();
                    }
                });
            });
        });
    }

    // ========================================================================
    // Catalog Panel (Center)
    // ========================================================================

    pub fn render_catalog_panel(&mut self, ctx: &egui::Context) {
        let mut clicked = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            render_search_bar(ui, &mut self.store, &mut self.search_input);
            ui.add_space(4.0);
            render_category_bar(ui, &mut self.store);
            ui.separator();

            let total = self.store.games().len();
            let shown = self.store.visible().len();
            if shown != total && shown > 0 {
                ui.label(format!("Showing {} of {} games", shown, total));
            }

            clicked = render_game_grid(ui, &self.store);
        });

        if let Some(game) = clicked {
            self.play(game);
        }
    }

    // ========================================================================
    // Sign-in Modal
    // ========================================================================

    pub fn render_auth_modal(&mut self, ctx: &egui::Context) {
        let action = render_auth_modal(ctx, &mut self.gate, &mut self.auth_form, self.auth_busy, Utc::now());
        if let Some(action) = action {
            self.handle_auth_action(action);
        }
    }
}
