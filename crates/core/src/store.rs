//! Catalog store: the single owner of the catalog, the category index and the
//! filter state. Filter mutators live here and re-derive the visible subset.

use crate::filter::compute_visible;
use crate::loader::{LoadOutcome, LoadReport};
use crate::models::{CategorySet, FilterState, GameRecord, LoadOrigin};

/// Token identifying one load request; only the latest one may be applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

/// What the grid should show right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing requested yet
    NotLoaded,
    /// A load is in flight and no catalog has been applied
    Loading,
    /// A catalog is present but nothing passes the filters
    NoResults,
    Ready,
}

#[derive(Debug, Default)]
pub struct CatalogStore {
    games: Vec<GameRecord>,
    visible: Vec<GameRecord>,
    categories: CategorySet,
    filter: FilterState,
    origin: Option<LoadOrigin>,
    report: Option<LoadReport>,
    issued: u64,
    in_flight: Option<LoadTicket>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Register a new load; any earlier ticket becomes stale
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        let ticket = LoadTicket(self.issued);
        self.in_flight = Some(ticket);
        ticket
    }

    /// Replace the catalog with a load result.
    ///
    /// Returns false and leaves the store untouched when `ticket` is stale.
    pub fn apply_load(&mut self, ticket: LoadTicket, outcome: LoadOutcome) -> bool {
        if self.in_flight != Some(ticket) {
            tracing::warn!("Discarding stale catalog load {:?} (current {:?})", ticket, self.in_flight);
            return false;
        }
        self.in_flight = None;
        self.games = outcome.games;
        self.categories = outcome.categories;
        self.origin = Some(outcome.origin);
        self.report = outcome.report;
        self.refresh();
        true
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn visible(&self) -> &[GameRecord] {
        &self.visible
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn origin(&self) -> Option<LoadOrigin> {
        self.origin
    }

    /// Row accounting of the last applied remote load
    pub fn report(&self) -> Option<&LoadReport> {
        self.report.as_ref()
    }

    pub fn skipped_rows(&self) -> usize {
        self.report.as_ref().map_or(0, |r| r.skipped.len())
    }

    pub fn view_state(&self) -> ViewState {
        match (self.origin, self.in_flight) {
            (None, None) => ViewState::NotLoaded,
            (None, Some(_)) => ViewState::Loading,
            (Some(_), _) if self.visible.is_empty() => ViewState::NoResults,
            (Some(_), _) => ViewState::Ready,
        }
    }

    // ========================================================================
    // Filter mutators
    // ========================================================================

    /// Restrict to one category (or the "all" sentinel). The search term is kept.
    pub fn set_category(&mut self, category: &str) -> &[GameRecord] {
        self.filter.active_category = category.to_string();
        self.refresh();
        &self.visible
    }

    /// Narrow by name. The active category is kept.
    pub fn set_search_term(&mut self, term: &str) -> &[GameRecord] {
        self.filter.search_term = term.to_string();
        self.refresh();
        &self.visible
    }

    pub fn clear_search_term(&mut self) -> &[GameRecord] {
        self.filter.search_term.clear();
        self.refresh();
        &self.visible
    }

    fn refresh(&mut self) {
        self.visible = compute_visible(&self.games, &self.filter);
    }
}
