//! Catalog backends.
//!
//! This module defines the [`Catalog`] trait the search session talks to.
//! [`OpenLibraryCatalog`] implements it against the public Open Library API;
//! [`MockCatalog`] returns scripted responses for tests and demos.
//!
//! A catalog is a plain request/response collaborator: one call per user
//! action, no retries, no caching. Failures are reported as [`CatalogError`]
//! and turned into user-facing messages by the session layer.

mod openlibrary;

pub mod mock;

pub use mock::MockCatalog;
pub use openlibrary::OpenLibraryCatalog;

use crate::models::{SearchPage, SearchQuery, WorkDetail};
use async_trait::async_trait;

/// A searchable book catalog
#[async_trait]
pub trait Catalog: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this catalog (e.g. "openlibrary")
    fn id(&self) -> &str;

    /// Human-readable name of this catalog
    fn name(&self) -> &str;

    /// Fetch one page of title search results
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage, CatalogError>;

    /// Fetch extended metadata for a work by its path-style key
    async fn work(&self, key: &str) -> Result<WorkDetail, CatalogError>;
}

/// Errors that can occur when talking to a catalog
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Connection, TLS, timeout or body read failure
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status
    #[error("API returned status {status}")]
    Api { status: u16 },

    /// Response body was not the expected JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Request could not be built (bad key, bad base URL)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            CatalogError::Api {
                status: status.as_u16(),
            }
        } else {
            CatalogError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Parse(format!("JSON: {}", err))
    }
}

impl From<url::ParseError> for CatalogError {
    fn from(err: url::ParseError) -> Self {
        CatalogError::InvalidRequest(err.to_string())
    }
}
