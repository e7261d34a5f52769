//! Shared data models used by the loader, the filter engine and the UI

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Pseudo-category meaning "no category restriction".
pub const ALL_CATEGORY: &str = "all";

/// Category assigned to rows whose category column is missing or blank.
pub const OTHER_CATEGORY: &str = "Other";

/// One playable entry of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub name: String,
    pub icon_url: String,
    /// Location of the playable resource, opened in the embedded frame
    pub link: String,
    pub category: String,
}

impl GameRecord {
    pub fn new(
        name: impl Into<String>,
        icon_url: impl Into<String>,
        link: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            icon_url: icon_url.into(),
            link: link.into(),
            category: category.into(),
        }
    }
}

/// Distinct categories seen among accepted records.
///
/// Never holds [`ALL_CATEGORY`]; the filter engine recognizes that sentinel on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySet(BTreeSet<String>);

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: impl Into<String>) -> bool {
        let category = category.into();
        if category == ALL_CATEGORY {
            return false;
        }
        self.0.insert(category)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.0.contains(category)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for CategorySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = CategorySet::new();
        for category in iter {
            set.insert(category);
        }
        set
    }
}

/// The two orthogonal filter knobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub active_category: String,
    pub search_term: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            active_category: ALL_CATEGORY.to_string(),
            search_term: String::new(),
        }
    }
}

impl FilterState {
    pub fn is_all_categories(&self) -> bool {
        self.active_category == ALL_CATEGORY
    }

    /// Search term as used for matching: trimmed and lowercased
    pub fn normalized_term(&self) -> String {
        self.search_term.trim().to_lowercase()
    }

    pub fn has_search(&self) -> bool {
        !self.search_term.trim().is_empty()
    }
}

/// Where the catalog currently in the store came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadOrigin {
    /// Parsed from the remote data source
    Remote,
    /// Built-in catalog used because the data source was unavailable
    Fallback,
}

impl LoadOrigin {
    pub fn label(&self) -> &'static str {
        match self {
            LoadOrigin::Remote => "Live catalog",
            LoadOrigin::Fallback => "Offline catalog",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_set_rejects_all_sentinel() {
        let mut set = CategorySet::new();
        assert!(!set.insert(ALL_CATEGORY));
        assert!(set.insert("Racing"));
        assert!(!set.insert("Racing"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn whitespace_term_is_not_a_search() {
        let filter = FilterState {
            active_category: ALL_CATEGORY.to_string(),
            search_term: "   ".to_string(),
        };
        assert!(!filter.has_search());
        assert_eq!(filter.normalized_term(), "");
    }
}
