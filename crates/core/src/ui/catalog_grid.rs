//! Catalog panel - category bar, search bar and card grid
//!
//! Renders: Category buttons, name search with clear button, wrapped grid of game cards
//! Features: Filters go through the store mutators, explicit loading and no-results states

use egui::{self, Color32, RichText, Ui};
use egui_phosphor::regular;

use crate::models::{GameRecord, ALL_CATEGORY};
use crate::store::{CatalogStore, ViewState};

const CARD_WIDTH: f32 = 200.0;
const ICON_HEIGHT: f32 = 130.0;

/// Icon for a category button; unknown categories get a star
pub fn category_icon(category: &str) -> &'static str {
    match category {
        ALL_CATEGORY => regular::SQUARES_FOUR,
        "Puzzle" => regular::PUZZLE_PIECE,
        "Racing" => regular::CAR,
        "Action" => regular::HAND_FIST,
        "Adventure" => regular::MOUNTAINS,
        "Educational" => regular::GRADUATION_CAP,
        "Sports" => regular::SOCCER_BALL,
        "Strategy" => regular::STRATEGY,
        "Arcade" => regular::GAME_CONTROLLER,
        _ => regular::STAR,
    }
}

// ============================================================================
// Render Functions
// ============================================================================

/// Render the category buttons
pub fn render_category_bar(ui: &mut Ui, store: &mut CatalogStore) {
    let active = store.filter().active_category.clone();
    let mut selected: Option<String> = None;

    ui.horizontal_wrapped(|ui| {
        let label = format!("{} All Games", category_icon(ALL_CATEGORY));
        if ui.selectable_label(active == ALL_CATEGORY, label).clicked() {
            selected = Some(ALL_CATEGORY.to_string());
        }
        for category in store.categories().iter() {
            let label = format!("{} {}", category_icon(category), category);
            if ui.selectable_label(active == category, label).clicked() {
                selected = Some(category.to_string());
            }
        }
    });

    if let Some(category) = selected {
        store.set_category(&category);
    }
}

/// Render the search field. `input` is the text box buffer owned by the caller.
pub fn render_search_bar(ui: &mut Ui, store: &mut CatalogStore, input: &mut String) {
    ui.horizontal(|ui| {
        ui.label(regular::MAGNIFYING_GLASS);
        let response = ui.add(
            egui::TextEdit::singleline(input)
                .hint_text("Search games...")
                .desired_width(240.0),
        );
        if response.changed() {
            store.set_search_term(input.as_str());
        }

        if !input.is_empty() && ui.small_button(regular::X).on_hover_text("Clear search").clicked() {
            input.clear();
            store.clear_search_term();
            response.request_focus();
        }
    });
}

/// Render the grid for the current view state.
///
/// Returns the game whose card was clicked, if any.
pub fn render_game_grid(ui: &mut Ui, store: &CatalogStore) -> Option<GameRecord> {
    match store.view_state() {
        ViewState::NotLoaded | ViewState::Loading => {
            ui.centered_and_justified(|ui| {
                ui.spinner();
            });
            return None;
        }
        ViewState::NoResults => {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label(RichText::new(regular::SMILEY_SAD).size(32.0));
                ui.label(RichText::new("No games found").strong());
                ui.label("Try a different search or category.");
            });
            return None;
        }
        ViewState::Ready => {}
    }

    let mut clicked = None;
    egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = egui::vec2(12.0, 12.0);
            for game in store.visible() {
                if render_game_card(ui, game) {
                    clicked = Some(game.clone());
                }
            }
        });
    });
    clicked
}

/// Render a single card; returns true when it was clicked
pub fn render_game_card(ui: &mut Ui, game: &GameRecord) -> bool {
    let frame = egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .corner_radius(8.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.vertical(|ui| {
                ui.add(
                    egui::Image::from_uri(game.icon_url.clone())
                        .fit_to_exact_size(egui::vec2(CARD_WIDTH, ICON_HEIGHT))
                        .corner_radius(4.0),
                );
                ui.add_space(4.0);
                ui.label(RichText::new(&game.name).strong());
                ui.label(RichText::new(&game.category).small().color(Color32::GRAY));
                ui.button(format!("{} Play Now", regular::PLAY)).clicked()
            })
            .inner
        });

    let card = frame.response.interact(egui::Sense::click());
    if card.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    frame.inner || card.clicked()
}
