//! Mock catalog source

use async_trait::async_trait;
use std::cell::Cell;

use crate::error::{CatalogError, Result};
use crate::loader::CatalogSource;

/// Catalog source returning canned text or a canned error.
///
/// # Example
///
/// ```rust,ignore
/// let source = MockCatalogSource::with_text("Name,Icon,Link\nPong,p.png,https://p.example");
/// let outcome = load_catalog(&source).await;
/// assert_eq!(outcome.games.len(), 1);
/// ```
#[derive(Debug)]
pub struct MockCatalogSource {
    response: Result<String>,
    fetches: Cell<usize>,
}

impl MockCatalogSource {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
            fetches: Cell::new(0),
        }
    }

    pub fn failing(error: CatalogError) -> Self {
        Self {
            response: Err(error),
            fetches: Cell::new(0),
        }
    }

    /// Number of times `fetch_text` was called
    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }
}

#[async_trait(?Send)]
impl CatalogSource for MockCatalogSource {
    async fn fetch_text(&self) -> Result<String> {
        self.fetches.set(self.fetches.get() + 1);
        self.response.clone()
    }

    fn describe(&self) -> String {
        "mock source".to_string()
    }
}
