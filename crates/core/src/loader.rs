//! Catalog loading: fetch the CSV export, parse it into records, fall back to
//! the built-in catalog when the source is unavailable.

use async_trait::async_trait;

use crate::error::{CatalogError, Result};
use crate::models::{CategorySet, GameRecord, LoadOrigin, OTHER_CATEGORY};
use crate::parser::parse_line;

/// Something that can hand back the raw catalog text.
///
/// Futures are `?Send` so the browser fetch can implement this directly.
#[async_trait(?Send)]
pub trait CatalogSource {
    /// Fetch the whole catalog as text. Called once per load, never retried.
    async fn fetch_text(&self) -> Result<String>;

    /// Short description for logs
    fn describe(&self) -> String {
        "catalog source".to_string()
    }
}

/// A data row that was dropped during parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the source text
    pub line: usize,
    pub reason: CatalogError,
}

/// Row accounting for a remote load. `rows_seen == accepted + skipped.len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rows_seen: usize,
    pub accepted: usize,
    pub skipped: Vec<SkippedRow>,
}

/// Result of parsing catalog text
#[derive(Debug, Clone, Default)]
pub struct ParsedCatalog {
    pub games: Vec<GameRecord>,
    pub categories: CategorySet,
    /// Non-blank data rows examined, accepted or not
    pub rows_seen: usize,
    pub skipped: Vec<SkippedRow>,
}

impl ParsedCatalog {
    pub fn report(&self) -> LoadReport {
        LoadReport {
            rows_seen: self.rows_seen,
            accepted: self.games.len(),
            skipped: self.skipped.clone(),
        }
    }
}

/// What a load hands to the store. Always usable, even after a failed fetch.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub games: Vec<GameRecord>,
    pub categories: CategorySet,
    pub origin: LoadOrigin,
    /// Row accounting, present for remote loads only
    pub report: Option<LoadReport>,
    /// The error that forced the fallback catalog, if any
    pub fetch_error: Option<CatalogError>,
}

impl LoadOutcome {
    fn remote(parsed: ParsedCatalog) -> Self {
        Self {
            report: Some(parsed.report()),
            games: parsed.games,
            categories: parsed.categories,
            origin: LoadOrigin::Remote,
            fetch_error: None,
        }
    }

    pub fn fallback(error: CatalogError) -> Self {
        let games = fallback_games();
        let categories = games.iter().map(|g| g.category.clone()).collect();
        Self {
            games,
            categories,
            origin: LoadOrigin::Fallback,
            report: None,
            fetch_error: Some(error),
        }
    }
}

/// Fetch and parse the catalog. Never fails: any fetch error yields the built-in catalog.
pub async fn load_catalog<S: CatalogSource + ?Sized>(source: &S) -> LoadOutcome {
    tracing::debug!("Loading catalog from {}", source.describe());

    match source.fetch_text().await {
        Ok(text) => {
            let parsed = parse_catalog(&text);
            tracing::info!(
                "Loaded {} games in {} categories ({} rows skipped)",
                parsed.games.len(),
                parsed.categories.len(),
                parsed.skipped.len()
            );
            LoadOutcome::remote(parsed)
        }
        Err(e) => {
            tracing::warn!("Failed to load catalog from {}: {}; using built-in catalog", source.describe(), e);
            LoadOutcome::fallback(e)
        }
    }
}

/// Parse catalog text. The first non-blank line is always treated as a header.
pub fn parse_catalog(text: &str) -> ParsedCatalog {
    let mut parsed = ParsedCatalog::default();

    let body = text.trim_start();
    let leading_lines = text[..text.len() - body.len()].matches('\n').count();

    for (idx, raw) in body.split('\n').enumerate().skip(1) {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        parsed.rows_seen += 1;

        let line_no = leading_lines + idx + 1;
        match parse_row(line_no, line) {
            Ok(game) => {
                parsed.categories.insert(game.category.clone());
                parsed.games.push(game);
            }
            Err(reason) => {
                tracing::debug!("Skipping catalog row: {}", reason);
                parsed.skipped.push(SkippedRow { line: line_no, reason });
            }
        }
    }

    parsed
}

/// Build one record from a data line; columns are name, icon, link, category
pub fn parse_row(line_no: usize, line: &str) -> Result<GameRecord> {
    let fields = parse_line(line);
    let column = |i: usize| fields.get(i).map(|f| f.trim()).unwrap_or("");

    let (name, icon_url, link) = (column(0), column(1), column(2));
    for (value, label) in [(name, "name"), (icon_url, "icon"), (link, "link")] {
        if value.is_empty() {
            return Err(CatalogError::Parse {
                line: line_no,
                reason: format!("missing {}", label),
            });
        }
    }

    let category = match column(3) {
        "" => OTHER_CATEGORY,
        c => c,
    };

    Ok(GameRecord::new(name, icon_url, link, category))
}

/// Whether a response content type can be read as catalog text
pub fn is_textual_content_type(content_type: Option<&str>) -> bool {
    match content_type {
        None => true,
        Some(ct) => {
            let ct = ct.trim().to_ascii_lowercase();
            ct.is_empty() || ct.starts_with("text/") || ct.contains("csv")
        }
    }
}

/// Built-in catalog shown when the data source cannot be reached
pub fn fallback_games() -> Vec<GameRecord> {
    vec![
        GameRecord::new(
            "Puzzle Adventure",
            "https://via.placeholder.com/300x200/ff6b6b/white?text=Puzzle",
            "https://example.com/puzzle-game",
            "Puzzle",
        ),
        GameRecord::new(
            "Racing Fun",
            "https://via.placeholder.com/300x200/4ecdc4/white?text=Racing",
            "https://example.com/racing-game",
            "Racing",
        ),
        GameRecord::new(
            "Memory Game",
            "https://via.placeholder.com/300x200/45b7d1/white?text=Memory",
            "https://example.com/memory-game",
            "Puzzle",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockCatalogSource;

    const HEADER: &str = "Name,Icon,Link,Category";

    #[test]
    fn header_only_is_an_empty_catalog() {
        let parsed = parse_catalog(HEADER);
        assert!(parsed.games.is_empty());
        assert!(parsed.categories.is_empty());
        assert_eq!(parsed.rows_seen, 0);
    }

    #[test]
    fn first_line_is_dropped_even_if_it_looks_like_data() {
        let text = "Tetris,t.png,https://t.example,Puzzle\nSnake,s.png,https://s.example,Arcade";
        let parsed = parse_catalog(text);
        assert_eq!(parsed.games.len(), 1);
        assert_eq!(parsed.games[0].name, "Snake");
    }

    #[test]
    fn leading_blank_lines_do_not_shift_the_header() {
        let text = "\n  \r\nName,Icon,Link,Category\nTetris,t.png,https://t.example,Puzzle\n,x.png,https://x.example,Puzzle\n";
        let parsed = parse_catalog(text);

        let names: Vec<_> = parsed.games.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Tetris"]);
        let categories: Vec<_> = parsed.categories.iter().collect();
        assert_eq!(categories, vec!["Puzzle"]);
        // Line numbers still refer to the untrimmed text
        assert_eq!(parsed.skipped[0].line, 5);
    }

    #[test]
    fn blank_category_becomes_other() {
        let text = format!("{}\nTetris,t.png,https://t.example,\nPong,p.png,https://p.example", HEADER);
        let parsed = parse_catalog(&text);
        assert_eq!(parsed.games.len(), 2);
        assert!(parsed.games.iter().all(|g| g.category == OTHER_CATEGORY));
        assert!(parsed.categories.contains(OTHER_CATEGORY));
        assert_eq!(parsed.categories.len(), 1);
    }

    #[test]
    fn rows_missing_required_fields_are_skipped() {
        let text = format!(
            "{}\n\
             Tetris,t.png,https://t.example,Puzzle\n\
             ,n.png,https://n.example,Puzzle\n\
             NoIcon,  ,https://n.example,Puzzle\n\
             NoLink,l.png,,Racing\n\
             \n\
             Speed,\"s,1.png\",https://s.example,Racing\r\n",
            HEADER
        );
        let parsed = parse_catalog(&text);

        let names: Vec<_> = parsed.games.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Tetris", "Speed"]);
        assert_eq!(parsed.games[1].icon_url, "s,1.png");
        assert_eq!(parsed.skipped.len(), 3);
        assert_eq!(parsed.rows_seen, parsed.games.len() + parsed.skipped.len());
        assert_eq!(parsed.skipped[0].line, 3);
        assert!(parsed.categories.contains("Racing"));

        let report = parsed.report();
        assert_eq!(report.rows_seen, 5);
        assert_eq!(report.accepted, 2);
        assert_eq!(report.rows_seen, report.accepted + report.skipped.len());
        assert!(matches!(report.skipped[0].reason, CatalogError::Parse { line: 3, .. }));
    }

    #[test]
    fn fields_are_trimmed() {
        let game = parse_row(2, "  Tetris , t.png ,https://t.example ,  Puzzle ").unwrap();
        assert_eq!(game, GameRecord::new("Tetris", "t.png", "https://t.example", "Puzzle"));
    }

    #[test]
    fn textual_content_types() {
        assert!(is_textual_content_type(None));
        assert!(is_textual_content_type(Some("text/csv; charset=utf-8")));
        assert!(is_textual_content_type(Some("text/plain")));
        assert!(is_textual_content_type(Some("application/csv")));
        assert!(!is_textual_content_type(Some("image/png")));
        assert!(!is_textual_content_type(Some("application/octet-stream")));
    }

    #[tokio::test]
    async fn fetch_failure_uses_fallback() {
        let source = MockCatalogSource::failing(CatalogError::Fetch("offline".into()));
        let outcome = load_catalog(&source).await;

        assert_eq!(outcome.origin, LoadOrigin::Fallback);
        assert!(outcome.games.len() >= 2);
        assert!(outcome.categories.len() >= 2);
        assert!(outcome.fetch_error.is_some());
        assert!(outcome.report.is_none());
        for game in &outcome.games {
            assert!(outcome.categories.contains(&game.category));
        }
    }

    #[tokio::test]
    async fn header_only_source_is_not_a_fallback() {
        let source = MockCatalogSource::with_text(HEADER);
        let outcome = load_catalog(&source).await;

        assert_eq!(outcome.origin, LoadOrigin::Remote);
        assert!(outcome.games.is_empty());
        assert!(outcome.categories.is_empty());
        assert_eq!(outcome.report, Some(LoadReport::default()));
        assert_eq!(source.fetch_count(), 1);
    }
}
