//! HTTP catalog source
//!
//! Uses gloo-net for browser fetch API

use async_trait::async_trait;
use gloo_net::http::Request;
use playdeck_core::loader::is_textual_content_type;
use playdeck_core::{CatalogError, CatalogSource};

/// Fetches the CSV export of the catalog spreadsheet
pub struct HttpCatalogSource {
    url: String,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait(?Send)]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_text(&self) -> Result<String, CatalogError> {
        let response = Request::get(&self.url)
            .send()
            .await
            .map_err(|e| CatalogError::Fetch(format!("Failed to send request: {}", e)))?;

        if !response.ok() {
            return Err(CatalogError::Fetch(format!(
                "Request failed with status {}",
                response.status()
            )));
        }

        let content_type = response.headers().get("content-type");
        if !is_textual_content_type(content_type.as_deref()) {
            return Err(CatalogError::Fetch(format!(
                "Unexpected content type {:?}",
                content_type.unwrap_or_default()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| CatalogError::Fetch(format!("Failed to read response: {}", e)))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
