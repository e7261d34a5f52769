//! Error types for PlayDeck

use thiserror::Error;

/// Failures inside the catalog pipeline.
///
/// The loader recovers from both variants itself, so they never reach the UI.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// Failure reported by the identity provider, identified by its error code
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Auth error: {code}")]
pub struct AuthError {
    pub code: String,
}

impl AuthError {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    /// User-facing text for this error
    pub fn message(&self) -> &'static str {
        crate::auth::message_for_code(&self.code)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Value(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
