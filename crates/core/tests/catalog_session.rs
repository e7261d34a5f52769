//! End-to-end session tests: load, filter, sign in and launch through the
//! public API, the way the web app drives it.

use chrono::Utc;
use playdeck_core::auth::{
    submit_credentials, AuthGate, AuthMode, AuthProvider, SkipFlagStore, UserHandle,
};
use playdeck_core::testing::{MemorySkipFlag, MockAuthProvider, MockCatalogSource};
use playdeck_core::{
    load_catalog, CatalogError, CatalogStore, LaunchEffect, LaunchSession, LoadOrigin, ViewState,
    ALL_CATEGORY, OTHER_CATEGORY,
};
use std::cell::RefCell;
use std::rc::Rc;

const CATALOG: &str = "\
name,iconUrl,link,category
Street Racer,https://img.example/sr.png,https://games.example/sr,Racing
Tetris,https://img.example/t.png,https://games.example/t,Puzzle
\"Drift, Inc.\",https://img.example/d.png,https://games.example/d,Racing
Broken Row,,https://games.example/b,Racing
Mystery Box,https://img.example/m.png,https://games.example/m,
";

fn names(store: &CatalogStore) -> Vec<&str> {
    store.visible().iter().map(|g| g.name.as_str()).collect()
}

#[tokio::test]
async fn load_then_filter() {
    let source = MockCatalogSource::with_text(CATALOG);
    let mut store = CatalogStore::new();

    let ticket = store.begin_load();
    assert_eq!(store.view_state(), ViewState::Loading);
    let outcome = load_catalog(&source).await;
    let report = outcome.report.clone().unwrap_or_default();
    assert_eq!(report.rows_seen, 5);
    assert_eq!(report.accepted, 4);
    assert_eq!(report.skipped.len(), 1);
    assert!(store.apply_load(ticket, outcome));
    assert_eq!(store.skipped_rows(), 1);

    assert_eq!(store.origin(), Some(LoadOrigin::Remote));
    assert_eq!(names(&store), vec!["Street Racer", "Tetris", "Drift, Inc.", "Mystery Box"]);
    let categories: Vec<_> = store.categories().iter().collect();
    assert_eq!(categories, vec![OTHER_CATEGORY, "Puzzle", "Racing"]);

    store.set_category("Racing");
    assert_eq!(names(&store), vec!["Street Racer", "Drift, Inc."]);

    store.set_search_term("DRIFT");
    assert_eq!(names(&store), vec!["Drift, Inc."]);

    store.set_category(ALL_CATEGORY);
    assert_eq!(names(&store), vec!["Drift, Inc."]);

    store.clear_search_term();
    assert_eq!(store.visible().len(), 4);

    store.set_search_term("nothing like this");
    assert_eq!(store.view_state(), ViewState::NoResults);
}

#[tokio::test]
async fn unreachable_source_still_shows_games() {
    let source = MockCatalogSource::failing(CatalogError::Fetch("HTTP 503".into()));
    let mut store = CatalogStore::new();
    let ticket = store.begin_load();
    store.apply_load(ticket, load_catalog(&source).await);

    assert_eq!(store.origin(), Some(LoadOrigin::Fallback));
    assert_eq!(store.view_state(), ViewState::Ready);
    assert!(store.categories().len() >= 2);
    store.set_category("Puzzle");
    assert!(!store.visible().is_empty());
}

#[tokio::test]
async fn auth_gate_follows_provider_events() {
    let provider = MockAuthProvider::new();
    let flags = MemorySkipFlag::default();
    let gate = Rc::new(RefCell::new(AuthGate::default()));

    let sink = gate.clone();
    let skipped = flags.is_skipped();
    let token = provider.on_auth_state_changed(Box::new(move |user: Option<&UserHandle>| {
        sink.borrow_mut().on_auth_state(user, skipped, Utc::now());
    }));
    assert!(!gate.borrow().is_open());

    provider.emit(None);
    assert!(gate.borrow().is_open());

    let outcome = submit_credentials(&provider, AuthMode::SignIn, "p@example.com", "secret1").await;
    gate.borrow_mut().on_submit(&outcome, Utc::now());
    assert!(!gate.borrow().is_open());

    assert!(provider.unsubscribe(token));
    assert_eq!(provider.subscriber_count(), 0);
}

#[test]
fn launch_cycle() {
    let mut session = LaunchSession::new();
    let game = playdeck_core::loader::fallback_games().remove(0);

    assert!(matches!(session.launch(game), LaunchEffect::LoadFrame { .. }));
    assert_eq!(session.frame_loaded(), LaunchEffect::RequestFullscreen);
    assert_eq!(session.close(), LaunchEffect::Close { exit_fullscreen: true });
}
