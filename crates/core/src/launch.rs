//! Game launch session: which game is open in the embedded frame and whether it
//! is fullscreen. The web app performs the returned effects against the DOM.

use crate::models::GameRecord;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LaunchState {
    #[default]
    Idle,
    /// Frame created, waiting for the content to report load or failure
    Loading(GameRecord),
    Playing(GameRecord),
    /// The frame could not load the game; a fallback notice is shown instead
    Failed(GameRecord),
}

/// Action the presentation layer has to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchEffect {
    None,
    LoadFrame { title: String, url: String },
    RequestFullscreen,
    ExitFullscreen,
    ShowFallback { title: String, link: String },
    Close { exit_fullscreen: bool },
}

#[derive(Debug, Clone, Default)]
pub struct LaunchSession {
    state: LaunchState,
    fullscreen: bool,
}

impl LaunchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LaunchState {
        &self.state
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, LaunchState::Idle)
    }

    pub fn current_game(&self) -> Option<&GameRecord> {
        match &self.state {
            LaunchState::Idle => None,
            LaunchState::Loading(g) | LaunchState::Playing(g) | LaunchState::Failed(g) => Some(g),
        }
    }

    /// Open a game, replacing whatever was running
    pub fn launch(&mut self, game: GameRecord) -> LaunchEffect {
        tracing::info!("Launching {} ({})", game.name, game.link);
        let effect = LaunchEffect::LoadFrame {
            title: game.name.clone(),
            url: game.link.clone(),
        };
        self.state = LaunchState::Loading(game);
        effect
    }

    /// The embedded content finished loading; this is the fullscreen trigger
    pub fn frame_loaded(&mut self) -> LaunchEffect {
        let LaunchState::Loading(game) = &self.state else {
            return LaunchEffect::None;
        };
        let game = game.clone();
        self.state = LaunchState::Playing(game);
        if self.fullscreen {
            return LaunchEffect::None;
        }
        self.fullscreen = true;
        LaunchEffect::RequestFullscreen
    }

    pub fn frame_failed(&mut self) -> LaunchEffect {
        let LaunchState::Loading(game) = &self.state else {
            return LaunchEffect::None;
        };
        let game = game.clone();
        tracing::warn!("Game frame failed to load {}", game.link);
        let effect = LaunchEffect::ShowFallback {
            title: game.name.clone(),
            link: game.link.clone(),
        };
        self.state = LaunchState::Failed(game);
        effect
    }

    pub fn toggle_fullscreen(&mut self) -> LaunchEffect {
        if !self.is_active() {
            return LaunchEffect::None;
        }
        self.fullscreen = !self.fullscreen;
        if self.fullscreen {
            LaunchEffect::RequestFullscreen
        } else {
            LaunchEffect::ExitFullscreen
        }
    }

    pub fn escape_pressed(&mut self) -> LaunchEffect {
        if !self.fullscreen {
            return LaunchEffect::None;
        }
        self.fullscreen = false;
        LaunchEffect::ExitFullscreen
    }

    /// Sync with the browser, e.g. when the user leaves fullscreen via browser controls
    pub fn fullscreen_changed(&mut self, active: bool) {
        self.fullscreen = active && self.is_active();
    }

    pub fn close(&mut self) -> LaunchEffect {
        if !self.is_active() {
            return LaunchEffect::None;
        }
        let exit_fullscreen = self.fullscreen;
        self.state = LaunchState::Idle;
        self.fullscreen = false;
        LaunchEffect::Close { exit_fullscreen }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> GameRecord {
        GameRecord::new("Racing Fun", "r.png", "https://example.com/racing-game", "Racing")
    }

    #[test]
    fn fullscreen_only_after_load_signal() {
        let mut session = LaunchSession::new();
        let effect = session.launch(game());
        assert_eq!(
            effect,
            LaunchEffect::LoadFrame {
                title: "Racing Fun".into(),
                url: "https://example.com/racing-game".into()
            }
        );
        assert!(!session.is_fullscreen());

        assert_eq!(session.frame_loaded(), LaunchEffect::RequestFullscreen);
        assert!(session.is_fullscreen());
        assert!(matches!(session.state(), LaunchState::Playing(_)));

        // A second load event (e.g. in-frame navigation) does nothing
        assert_eq!(session.frame_loaded(), LaunchEffect::None);
    }

    #[test]
    fn failure_shows_fallback_link() {
        let mut session = LaunchSession::new();
        session.launch(game());
        assert_eq!(
            session.frame_failed(),
            LaunchEffect::ShowFallback {
                title: "Racing Fun".into(),
                link: "https://example.com/racing-game".into()
            }
        );
        assert!(!session.is_fullscreen());
        assert_eq!(session.current_game().map(|g| g.name.as_str()), Some("Racing Fun"));
    }

    #[test]
    fn browser_exit_syncs_state() {
        let mut session = LaunchSession::new();
        session.launch(game());
        session.frame_loaded();
        session.fullscreen_changed(false);
        assert!(!session.is_fullscreen());
        assert_eq!(session.escape_pressed(), LaunchEffect::None);
        assert_eq!(session.toggle_fullscreen(), LaunchEffect::RequestFullscreen);
        assert_eq!(session.escape_pressed(), LaunchEffect::ExitFullscreen);
    }

    #[test]
    fn close_resets_session() {
        let mut session = LaunchSession::new();
        assert_eq!(session.close(), LaunchEffect::None);
        assert_eq!(session.toggle_fullscreen(), LaunchEffect::None);

        session.launch(game());
        session.frame_loaded();
        assert_eq!(session.close(), LaunchEffect::Close { exit_fullscreen: true });
        assert!(!session.is_active());
        assert!(session.current_game().is_none());
    }
}
