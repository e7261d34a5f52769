//! In-memory collaborators for tests.

mod mock_auth;
mod mock_source;

pub use mock_auth::*;
pub use mock_source::*;

use crate::auth::SkipFlagStore;

/// Skip flag kept in memory instead of browser storage
#[derive(Debug, Clone, Default)]
pub struct MemorySkipFlag {
    skipped: bool,
}

impl SkipFlagStore for MemorySkipFlag {
    fn is_skipped(&self) -> bool {
        self.skipped
    }

    fn set_skipped(&mut self, skipped: bool) {
        self.skipped = skipped;
    }
}
