//! Sign-in modal - shared rendering of the auth gate
//!
//! Renders: Sign in / sign up tabs, email and password fields, notice line, skip link

use chrono::{DateTime, Utc};
use egui::{self, Color32, RichText};
use egui_phosphor::regular;

use crate::auth::{AuthGate, AuthMode, NoticeKind, UserHandle};

/// Text field contents of the modal
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
}

/// What the user asked the modal to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthModalAction {
    Submit {
        mode: AuthMode,
        email: String,
        password: String,
    },
    Skip,
    Close,
}

/// Render the modal if the gate is open. `busy` disables submit while a
/// provider call is in flight.
pub fn render_auth_modal(
    ctx: &egui::Context,
    gate: &mut AuthGate,
    form: &mut AuthForm,
    busy: bool,
    now: DateTime<Utc>,
) -> Option<AuthModalAction> {
    if !gate.is_open() {
        return None;
    }

    // Semi-transparent backdrop
    let screen_rect = ctx.input(|i| i.viewport().inner_rect.unwrap_or(egui::Rect::NOTHING));
    egui::Area::new(egui::Id::new("auth_backdrop"))
        .fixed_pos(screen_rect.min)
        .show(ctx, |ui| {
            ui.painter()
                .rect_filled(screen_rect, 0.0, Color32::from_black_alpha(160));
        });

    let mut action = None;
    let mode = gate.mode();

    egui::Window::new(format!("{} {}", regular::GAME_CONTROLLER, mode.title()))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([340.0, 0.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.selectable_label(mode == AuthMode::SignIn, "Sign In").clicked() {
                    gate.set_mode(AuthMode::SignIn);
                }
                if ui.selectable_label(mode == AuthMode::SignUp, "Sign Up").clicked() {
                    gate.set_mode(AuthMode::SignUp);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button(regular::X).on_hover_text("Close").clicked() {
                        action = Some(AuthModalAction::Close);
                    }
                });
            });
            ui.separator();

            ui.label("Email");
            ui.add(egui::TextEdit::singleline(&mut form.email).hint_text("you@example.com"));
            ui.label("Password");
            let password = ui.add(egui::TextEdit::singleline(&mut form.password).password(true));
            let enter = password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            ui.add_space(8.0);
            let submit = ui.add_enabled(!busy, egui::Button::new(mode.submit_label()));
            if busy {
                ui.spinner();
            }
            if !busy && (submit.clicked() || enter) {
                action = Some(AuthModalAction::Submit {
                    mode: gate.mode(),
                    email: form.email.clone(),
                    password: form.password.clone(),
                });
            }

            if let Some(notice) = gate.notice(now) {
                let color = match notice.kind {
                    NoticeKind::Success => Color32::from_rgb(80, 200, 120),
                    NoticeKind::Error => Color32::from_rgb(230, 80, 80),
                };
                ui.add_space(6.0);
                ui.colored_label(color, notice.text.as_str());
            }

            ui.add_space(8.0);
            ui.separator();
            if ui.link("Skip for now").clicked() {
                action = Some(AuthModalAction::Skip);
            }
        });

    action
}

/// Account button for the top bar. Returns true when clicked.
pub fn render_account_button(ui: &mut egui::Ui, user: Option<&UserHandle>) -> bool {
    let label = match user {
        Some(user) => format!("{} {}", regular::USER_CIRCLE, user.display_name()),
        None => format!("{} Sign In", regular::USER),
    };
    ui.button(RichText::new(label)).clicked()
}
