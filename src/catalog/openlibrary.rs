//! Open Library catalog implementation.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::catalog::{Catalog, CatalogError};
use crate::config::CatalogConfig;
use crate::models::{SearchPage, SearchQuery, WorkDetail};
use crate::utils::HttpClient;

const OPENLIBRARY_API_BASE: &str = "https://openlibrary.org";

/// Open Library catalog
///
/// Uses the `search.json` endpoint for title search and
/// `<work key>.json` for work details.
#[derive(Debug, Clone)]
pub struct OpenLibraryCatalog {
    http: HttpClient,
    base_url: String,
}

impl OpenLibraryCatalog {
    /// Create a catalog pointing at openlibrary.org with default HTTP options
    pub fn new() -> Result<Self, CatalogError> {
        Self::with_base_url(OPENLIBRARY_API_BASE)
    }

    /// Create a catalog pointing at another host (mirrors, test servers)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, CatalogError> {
        let http = HttpClient::new()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a catalog from configuration
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let http = HttpClient::with_options(&config.http_options())?;
        Ok(Self::with_client(http, config.base_url.clone()))
    }

    /// Create a catalog sharing an existing HTTP client
    pub fn with_client(http: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the search URL for a query
    fn search_url(&self, query: &SearchQuery) -> Result<url::Url, CatalogError> {
        let url = format!(
            "{}/search.json?title={}&page={}",
            self.base_url,
            urlencoding::encode(&query.title),
            query.page
        );
        Ok(url::Url::parse(&url)?)
    }

    /// Build the detail URL for a work key such as `/works/OL82563W`
    fn work_url(&self, key: &str) -> Result<url::Url, CatalogError> {
        let key = key.trim();
        if key.is_empty() || key.contains(|c: char| c == '?' || c == '#' || c.is_whitespace()) {
            return Err(CatalogError::InvalidRequest(format!(
                "Invalid work key: {:?}",
                key
            )));
        }

        let url = if key.starts_with('/') {
            format!("{}{}.json", self.base_url, key)
        } else {
            format!("{}/{}.json", self.base_url, key)
        };
        Ok(url::Url::parse(&url)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: url::Url) -> Result<T, CatalogError> {
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .client()
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(format!("Failed to reach Open Library: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Api {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Network(format!("Failed to read response: {}", e)))?;

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Catalog for OpenLibraryCatalog {
    fn id(&self) -> &str {
        "openlibrary"
    }

    fn name(&self) -> &str {
        "Open Library"
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchPage, CatalogError> {
        let url = self.search_url(query)?;
        let page: SearchPage = self.get_json(url).await?;

        tracing::debug!(
            "Open Library returned {} of {} results for {:?} (page {})",
            page.docs.len(),
            page.num_found,
            query.title,
            query.page
        );
        Ok(page)
    }

    async fn work(&self, key: &str) -> Result<WorkDetail, CatalogError> {
        let url = self.work_url(key)?;
        self.get_json(url).await
    }
}
