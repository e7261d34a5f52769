//! Runtime configuration, read from JSON embedded in the host page

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_CATALOG_URL: &str = "https://docs.google.com/spreadsheets/d/1dA60aigQuQVTY2AWGinJBwFBm5QyHNnrP-tYjcb-H7M/export?format=csv";
pub const DEFAULT_SKIP_AUTH_KEY: &str = "playdeck_skip_auth";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// CSV export the catalog is loaded from
    pub catalog_url: String,

    /// Local storage key of the "skip sign-in" flag
    pub skip_auth_key: String,

    /// How long auth notices stay visible
    pub notice_seconds: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            skip_auth_key: DEFAULT_SKIP_AUTH_KEY.to_string(),
            notice_seconds: crate::auth::DEFAULT_NOTICE_SECONDS,
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse embedded config if present, falling back to defaults on any problem
    pub fn load_or_default(json: Option<&str>) -> Self {
        match json.map(str::trim).filter(|s| !s.is_empty()) {
            Some(json) => match Self::from_json(json) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Ignoring page config: {}", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.catalog_url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://") || url.starts_with('/')) {
            return Err(ConfigError::Value(format!("catalog_url is not a URL: {:?}", url)));
        }
        if self.skip_auth_key.trim().is_empty() {
            return Err(ConfigError::Value("skip_auth_key is empty".to_string()));
        }
        if self.notice_seconds <= 0 {
            return Err(ConfigError::Value("notice_seconds must be positive".to_string()));
        }
        Ok(())
    }

    /// Apply a `?catalog=` override from the page URL
    pub fn with_query(mut self, search: &str) -> Self {
        if let Some(url) = query_param(search, "catalog") {
            let candidate = AppConfig {
                catalog_url: url,
                ..self.clone()
            };
            match candidate.validate() {
                Ok(()) => self = candidate,
                Err(e) => tracing::warn!("Ignoring catalog override: {}", e),
            }
        }
        self
    }

    pub fn notice_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.notice_seconds)
    }
}

/// Value of `key` in a location search string such as `?a=1&b=2`
pub fn query_param(search: &str, key: &str) -> Option<String> {
    search
        .strip_prefix('?')
        .unwrap_or(search)
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .and_then(|(_, v)| urlencoding::decode(&v.replace('+', " ")).ok().map(|v| v.into_owned()))
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config = AppConfig::from_json(r#"{"notice_seconds": 3}"#).unwrap();
        assert_eq!(config.catalog_url, DEFAULT_CATALOG_URL);
        assert_eq!(config.notice_seconds, 3);
    }

    #[test]
    fn invalid_config_falls_back() {
        assert_eq!(AppConfig::load_or_default(Some("{not json")), AppConfig::default());
        assert_eq!(
            AppConfig::load_or_default(Some(r#"{"catalog_url": "ftp://x"}"#)),
            AppConfig::default()
        );
        assert_eq!(AppConfig::load_or_default(None), AppConfig::default());
    }

    #[test]
    fn query_override() {
        let config = AppConfig::default().with_query("?x=1&catalog=https%3A%2F%2Fcdn.example%2Fgames.csv");
        assert_eq!(config.catalog_url, "https://cdn.example/games.csv");

        let untouched = AppConfig::default().with_query("?catalog=javascript:alert(1)");
        assert_eq!(untouched.catalog_url, DEFAULT_CATALOG_URL);
    }

    #[test]
    fn query_param_parsing() {
        assert_eq!(query_param("?a=1&b=two+words", "b").as_deref(), Some("two words"));
        assert_eq!(query_param("a=1", "a").as_deref(), Some("1"));
        assert_eq!(query_param("?a=", "a"), None);
        assert_eq!(query_param("", "a"), None);
    }
}
