//! Filter engine: derives the visible subset from the catalog and the filter state

use crate::models::{FilterState, GameRecord};

/// Whether a single record passes both filter dimensions
pub fn matches(game: &GameRecord, filter: &FilterState) -> bool {
    matches_normalized(game, filter, &filter.normalized_term())
}

fn matches_normalized(game: &GameRecord, filter: &FilterState, term: &str) -> bool {
    // Category filter
    if !filter.is_all_categories() && game.category != filter.active_category {
        return false;
    }
    // Name search
    term.is_empty() || game.name.to_lowercase().contains(term)
}

/// Records visible under `filter`, in catalog order
pub fn compute_visible(catalog: &[GameRecord], filter: &FilterState) -> Vec<GameRecord> {
    let term = filter.normalized_term();
    catalog
        .iter()
        .filter(|g| matches_normalized(g, filter, &term))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ALL_CATEGORY;

    fn catalog() -> Vec<GameRecord> {
        vec![
            GameRecord::new("Street Racer", "a.png", "https://a.example", "Racing"),
            GameRecord::new("Tetris", "b.png", "https://b.example", "Puzzle"),
            GameRecord::new("Drift King", "c.png", "https://c.example", "Racing"),
            GameRecord::new("Rally Tracks", "d.png", "https://d.example", "Racing"),
            GameRecord::new("Traced Lines", "e.png", "https://e.example", "Puzzle"),
        ]
    }

    fn filter(category: &str, term: &str) -> FilterState {
        FilterState {
            active_category: category.to_string(),
            search_term: term.to_string(),
        }
    }

    fn names(games: &[GameRecord]) -> Vec<&str> {
        games.iter().map(|g| g.name.as_str()).collect()
    }

    #[test]
    fn unfiltered_view_is_the_whole_catalog() {
        let all = catalog();
        assert_eq!(compute_visible(&all, &FilterState::default()), all);
    }

    #[test]
    fn category_filter_preserves_order() {
        let visible = compute_visible(&catalog(), &filter("Racing", ""));
        assert_eq!(names(&visible), vec!["Street Racer", "Drift King", "Rally Tracks"]);
    }

    #[test]
    fn search_is_case_insensitive_within_category() {
        let visible = compute_visible(&catalog(), &filter("Racing", "RAC"));
        assert_eq!(names(&visible), vec!["Street Racer", "Rally Tracks"]);
    }

    #[test]
    fn search_across_all_categories() {
        let visible = compute_visible(&catalog(), &filter(ALL_CATEGORY, "rac"));
        assert_eq!(names(&visible), vec!["Street Racer", "Rally Tracks", "Traced Lines"]);
    }

    #[test]
    fn no_match_is_empty() {
        assert!(compute_visible(&catalog(), &filter(ALL_CATEGORY, "zzz")).is_empty());
        assert!(compute_visible(&catalog(), &filter("Sports", "")).is_empty());
    }

    #[test]
    fn single_record_match() {
        let tetris = &catalog()[1];
        assert!(matches(tetris, &filter("Puzzle", " tet ")));
        assert!(!matches(tetris, &filter("Racing", "")));
    }
}
