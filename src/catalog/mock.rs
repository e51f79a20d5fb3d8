//! Mock catalog for testing purposes.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::catalog::{Catalog, CatalogError};
use crate::models::{BookDoc, BookDocBuilder, SearchPage, SearchQuery, WorkDetail};

/// A catalog that replays queued responses and records every request.
///
/// When a queue runs dry, searches return an empty page and work lookups a
/// network error.
#[derive(Debug, Default)]
pub struct MockCatalog {
    searches: Mutex<VecDeque<Result<SearchPage, CatalogError>>>,
    works: Mutex<VecDeque<Result<WorkDetail, CatalogError>>>,
    search_calls: Mutex<Vec<SearchQuery>>,
    work_calls: Mutex<Vec<String>>,
}

impl MockCatalog {
    /// Create a new mock catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next search.
    pub fn push_search(&self, result: Result<SearchPage, CatalogError>) {
        lock(&self.searches).push_back(result);
    }

    /// Queue the result of the next work lookup.
    pub fn push_work(&self, result: Result<WorkDetail, CatalogError>) {
        lock(&self.works).push_back(result);
    }

    /// Searches received so far, in order.
    pub fn search_calls(&self) -> Vec<SearchQuery> {
        lock(&self.search_calls).clone()
    }

    /// Work keys requested so far, in order.
    pub fn work_calls(&self) -> Vec<String> {
        lock(&self.work_calls).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl Catalog for MockCatalog {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Catalog"
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchPage, CatalogError> {
        lock(&self.search_calls).push(query.clone());
        lock(&self.searches)
            .pop_front()
            .unwrap_or_else(|| Ok(SearchPage::default()))
    }

    async fn work(&self, key: &str) -> Result<WorkDetail, CatalogError> {
        lock(&self.work_calls).push(key.to_string());
        lock(&self.works)
            .pop_front()
            .unwrap_or_else(|| Err(CatalogError::Network("no scripted response".to_string())))
    }
}

/// Helper function to create a mock book for testing.
pub fn make_book(id: &str, title: &str) -> BookDoc {
    BookDocBuilder::new(format!("/works/{}", id))
        .title(title)
        .build()
}
