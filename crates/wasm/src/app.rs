//! WASM App state and event handling

use chrono::Utc;
use eframe::egui;
use playdeck_core::auth::{
    submit_credentials, AuthGate, AuthMode, AuthProvider, SkipFlagStore, SubmitOutcome,
    SubscriptionToken, UserHandle,
};
use playdeck_core::{
    load_catalog, AppConfig, AuthError, AuthForm, AuthModalAction, CatalogStore, GameRecord,
    LaunchEffect, LaunchSession, LoadOrigin, LoadOutcome, LoadTicket,
};
use std::cell::RefCell;
use std::rc::Rc;

use crate::auth_bridge::JsAuthProvider;
use crate::game_frame::{FrameEvent, GameFrame};
use crate::http_client::HttpCatalogSource;
use crate::storage::{load_config, LocalSkipFlag};

// ============================================================================
// Types
// ============================================================================

/// Completed provider call, delivered from a spawned task
pub(crate) enum AuthResult {
    Submitted(SubmitOutcome),
    SignedOut(Result<(), AuthError>),
}

// ============================================================================
// Main App
// ============================================================================

pub struct WasmApp {
    pub(crate) ctx: egui::Context,
    pub(crate) config: AppConfig,

    // Catalog
    pub(crate) store: CatalogStore,
    pub(crate) search_input: String,
    pub(crate) load_inbox: Rc<RefCell<Option<(LoadTicket, LoadOutcome)>>>,

    // Auth
    pub(crate) auth: Rc<JsAuthProvider>,
    pub(crate) auth_subscription: SubscriptionToken,
    pub(crate) auth_events: Rc<RefCell<Vec<Option<UserHandle>>>>,
    pub(crate) auth_results: Rc<RefCell<Vec<AuthResult>>>,
    pub(crate) current_user: Option<UserHandle>,
    pub(crate) gate: AuthGate,
    pub(crate) auth_form: AuthForm,
    pub(crate) auth_busy: bool,
    pub(crate) skip_flag: LocalSkipFlag,

    // Game frame
    pub(crate) launch: LaunchSession,
    pub(crate) frame: Option<GameFrame>,

    pub(crate) status: String,
}

impl WasmApp {
    pub fn new(ctx: egui::Context) -> Self {
        let config = load_config();
        tracing::info!("Catalog source: {}", config.catalog_url);

        let auth = Rc::new(JsAuthProvider::connect());
        let auth_events: Rc<RefCell<Vec<Option<UserHandle>>>> = Rc::new(RefCell::new(Vec::new()));
        let auth_subscription = {
            let events = auth_events.clone();
            let ctx = ctx.clone();
            auth.on_auth_state_changed(Box::new(move |user: Option<&UserHandle>| {
                events.borrow_mut().push(user.cloned());
                ctx.request_repaint();
            }))
        };

        let frame = match GameFrame::mount() {
            Ok(frame) => Some(frame),
            Err(e) => {
                tracing::error!("Failed to create game frame: {}", e);
                None
            }
        };

        let mut app = Self {
            ctx,
            gate: AuthGate::new(config.notice_ttl()),
            skip_flag: LocalSkipFlag::new(config.skip_auth_key.clone()),
            config,
            store: CatalogStore::new(),
            search_input: String::new(),
            load_inbox: Rc::new(RefCell::new(None)),
            auth,
            auth_subscription,
            auth_events,
            auth_results: Rc::new(RefCell::new(Vec::new())),
            current_user: None,
            auth_form: AuthForm::default(),
            auth_busy: false,
            launch: LaunchSession::new(),
            frame,
            status: "Loading games...".to_string(),
        };

        app.start_load();
        app
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    pub(crate) fn start_load(&mut self) {
        let ticket = self.store.begin_load();
        let source = HttpCatalogSource::new(self.config.catalog_url.clone());
        let inbox = self.load_inbox.clone();
        let ctx = self.ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let outcome = load_catalog(&source).await;
            *inbox.borrow_mut() = Some((ticket, outcome));
            ctx.request_repaint();
        });
    }

    pub(crate) fn check_load(&mut self) {
        let Some((ticket, outcome)) = self.load_inbox.borrow_mut().take() else {
            return;
        };
        let origin = outcome.origin;
        if self.store.apply_load(ticket, outcome) {
            self.status = match origin {
                LoadOrigin::Remote => format!("{} games", self.store.games().len()),
                LoadOrigin::Fallback => "Could not reach the catalog, showing built-in games".to_string(),
            };
        }
    }

    // ========================================================================
    // Auth
    // ========================================================================

    pub(crate) fn check_auth(&mut self) {
        let now = Utc::now();

        let events = std::mem::take(&mut *self.auth_events.borrow_mut());
        for user in events {
            self.gate.on_auth_state(user.as_ref(), self.skip_flag.is_skipped(), now);
            self.current_user = user;
        }

        let results = std::mem::take(&mut *self.auth_results.borrow_mut());
        for result in results {
            match result {
                AuthResult::Submitted(outcome) => {
                    self.auth_busy = false;
                    if !matches!(outcome, SubmitOutcome::Failed(_)) {
                        self.auth_form.password.clear();
                    }
                    self.gate.on_submit(&outcome, now);
                }
                AuthResult::SignedOut(Err(e)) => {
                    tracing::warn!("Sign out failed: {}", e);
                    self.status = e.message().to_string();
                }
                AuthResult::SignedOut(Ok(())) => {}
            }
        }

        if self.gate.prune_notice(now) {
            self.ctx.request_repaint();
        }
    }

    pub(crate) fn handle_auth_action(&mut self, action: AuthModalAction) {
        match action {
            AuthModalAction::Submit { mode, email, password } => self.submit(mode, email, password),
            AuthModalAction::Skip => self.gate.skip(&mut self.skip_flag, Utc::now()),
            AuthModalAction::Close => self.gate.close(),
        }
    }

    fn submit(&mut self, mode: AuthMode, email: String, password: String) {
        self.auth_busy = true;
        let provider = self.auth.clone();
        let results = self.auth_results.clone();
        let ctx = self.ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let outcome = submit_credentials(&*provider, mode, &email, &password).await;
            results.borrow_mut().push(AuthResult::Submitted(outcome));
            ctx.request_repaint();
        });
    }

    pub(crate) fn account_clicked(&mut self) {
        if self.current_user.is_none() {
            self.gate.open();
            return;
        }

        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message("Do you want to sign out?").ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        let provider = self.auth.clone();
        let results = self.auth_results.clone();
        let ctx = self.ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = provider.sign_out().await;
            results.borrow_mut().push(AuthResult::SignedOut(result));
            ctx.request_repaint();
        });
    }

    // ========================================================================
    // Game Frame
    // ========================================================================

    pub(crate) fn play(&mut self, game: GameRecord) {
        let effect = self.launch.launch(game);
        self.apply_launch_effect(effect);
    }

    pub(crate) fn check_frame(&mut self) {
        let events = match &self.frame {
            Some(frame) => frame.poll_events(),
            None => return,
        };

        for event in events {
            let effect = match event {
                FrameEvent::Loaded => self.launch.frame_loaded(),
                FrameEvent::Failed => self.launch.frame_failed(),
                FrameEvent::ToggleFullscreen => self.launch.toggle_fullscreen(),
                FrameEvent::Close => self.launch.close(),
                FrameEvent::FullscreenChanged(active) => {
                    self.launch.fullscreen_changed(active);
                    if let Some(frame) = &self.frame {
                        frame.set_fullscreen_label(self.launch.is_fullscreen());
                    }
                    LaunchEffect::None
                }
            };
            self.apply_launch_effect(effect);
        }
    }

    fn apply_launch_effect(&mut self, effect: LaunchEffect) {
        let Some(frame) = &self.frame else {
            // Without a frame the only option is a new tab
            if let LaunchEffect::LoadFrame { url, .. } = effect {
                if let Some(w) = web_sys::window() {
                    match w.open_with_url_and_target(&url, "_blank") {
                        Ok(Some(_)) => {}
                        Ok(None) => tracing::warn!("Popup blocked opening {}", url),
                        Err(e) => tracing::warn!("Failed to open {}: {:?}", url, e),
                    }
                }
                self.launch.close();
            }
            return;
        };

        match effect {
            LaunchEffect::None => {}
            LaunchEffect::LoadFrame { title, url } => frame.open(&title, &url),
            LaunchEffect::RequestFullscreen => frame.request_fullscreen(),
            LaunchEffect::ExitFullscreen => frame.exit_fullscreen(),
            LaunchEffect::ShowFallback { title, link } => frame.show_fallback(&title, &link),
            LaunchEffect::Close { exit_fullscreen } => {
                if exit_fullscreen {
                    frame.exit_fullscreen();
                }
                frame.close();
            }
        }
    }
}

impl Drop for WasmApp {
    fn drop(&mut self) {
        self.auth.unsubscribe(self.auth_subscription);
    }
}

// ============================================================================
// eframe::App Implementation
// ============================================================================

impl eframe::App for WasmApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load();
        self.check_auth();
        self.check_frame();

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            let effect = self.launch.escape_pressed();
            self.apply_launch_effect(effect);
        }

        if self.gate.notice(Utc::now()).is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(500));
        }

        // Render panels (implemented in panels.rs)
        self.render_top_panel(ctx);
        self.render_catalog_panel(ctx);
        self.render_auth_modal(ctx);
    }
}
