//! Browser storage and page helpers

use gloo_storage::{LocalStorage, Storage};
use playdeck_core::auth::SkipFlagStore;
use playdeck_core::AppConfig;

/// Element holding the JSON config embedded in the host page
const CONFIG_ELEMENT_ID: &str = "playdeck-config";

// ============================================================================
// Skip Sign-in Flag
// ============================================================================

/// "Skip sign-in" flag persisted in localStorage
pub struct LocalSkipFlag {
    key: String,
}

impl LocalSkipFlag {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl SkipFlagStore for LocalSkipFlag {
    fn is_skipped(&self) -> bool {
        LocalStorage::get::<bool>(&self.key).unwrap_or(false)
    }

    fn set_skipped(&mut self, skipped: bool) {
        let result = if skipped {
            LocalStorage::set(&self.key, true)
        } else {
            LocalStorage::delete(&self.key);
            Ok(())
        };
        if let Err(e) = result {
            tracing::warn!("Failed to store skip flag: {}", e);
        }
    }
}

// ============================================================================
// Page Config
// ============================================================================

fn embedded_config_json() -> Option<String> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|e| e.text_content())
}

fn location_search() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Config from the page, with the `?catalog=` query override applied
pub fn load_config() -> AppConfig {
    let json = embedded_config_json();
    AppConfig::load_or_default(json.as_deref()).with_query(&location_search())
}
