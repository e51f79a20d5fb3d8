//! Search session: the state behind the results grid and the detail view.
//!
//! [`SearchSession`] and [`DetailSession`] hold the state and its
//! transitions without doing any I/O. [`BookFinder`] drives them against a
//! [`Catalog`], one request per user action:
//!
//! ```rust,no_run
//! use book_finder::catalog::OpenLibraryCatalog;
//! use book_finder::session::BookFinder;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut finder = BookFinder::new(Arc::new(OpenLibraryCatalog::new()?));
//! finder.set_query("dune");
//! finder.submit().await;
//! if finder.search().can_load_more() {
//!     finder.load_more().await;
//! }
//! finder.open(0).await;
//! # Ok(())
//! # }
//! ```

mod detail;
mod search;

pub use detail::{DetailPhase, DetailSession, DetailTicket};
pub use search::{
    FetchKind, SearchPhase, SearchSession, SearchTicket, NO_RESULTS_MESSAGE,
    SEARCH_FAILED_MESSAGE,
};

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::models::BookDoc;

/// What happened to a user action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The response was applied to the state
    Applied,
    /// A newer request superseded this one; state untouched
    Stale,
    /// Preconditions not met, no request issued
    Skipped,
}

/// Drives a search session against a catalog.
#[derive(Debug)]
pub struct BookFinder<C: Catalog + ?Sized = dyn Catalog> {
    catalog: Arc<C>,
    search: SearchSession,
    detail: DetailSession,
}

impl<C: Catalog + ?Sized> BookFinder<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self {
            catalog,
            search: SearchSession::new(),
            detail: DetailSession::new(),
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn search(&self) -> &SearchSession {
        &self.search
    }

    pub fn detail(&self) -> &DetailSession {
        &self.detail
    }

    /// Replace the query text
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search.set_query(query);
    }

    /// Run a fresh search for the current query
    pub async fn submit(&mut self) -> Completion {
        let Some(ticket) = self.search.submit() else {
            return Completion::Skipped;
        };
        let result = self.catalog.search(ticket.query()).await;
        self.search.complete(ticket, result)
    }

    /// Fetch and append the next page
    pub async fn load_more(&mut self) -> Completion {
        let Some(ticket) = self.search.load_more() else {
            return Completion::Skipped;
        };
        let result = self.catalog.search(ticket.query()).await;
        self.search.complete(ticket, result)
    }

    /// Open the detail view for the result at `index` (0-based)
    pub async fn open(&mut self, index: usize) -> Completion {
        match self.search.books().get(index).cloned() {
            Some(book) => self.open_book(book).await,
            None => Completion::Skipped,
        }
    }

    /// Open the detail view for any record
    pub async fn open_book(&mut self, book: BookDoc) -> Completion {
        let Some(ticket) = self.detail.select(book) else {
            // Resolved without a request
            return Completion::Applied;
        };
        let result = self.catalog.work(ticket.key()).await;
        self.detail.complete(ticket, result)
    }

    /// Close the detail view
    pub fn close(&mut self) {
        self.detail.dismiss();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::mock::make_book;
    use crate::catalog::{CatalogError, MockCatalog};
    use crate::models::{Description, SearchPage, SearchQuery, WorkDetail};

    fn finder() -> (Arc<MockCatalog>, BookFinder<MockCatalog>) {
        let catalog = Arc::new(MockCatalog::new());
        (catalog.clone(), BookFinder::new(catalog))
    }

    #[test]
    fn test_finder_exposes_catalog() {
        let (_, finder) = finder();
        assert_eq!(finder.catalog().id(), "mock");
        assert_eq!(finder.search().phase(), SearchPhase::Idle);
        assert!(finder.detail().selected().is_none());
    }

    #[tokio::test]
    async fn test_whitespace_query_makes_no_request() {
        let (catalog, mut finder) = finder();
        finder.set_query("   ");

        assert_eq!(finder.submit().await, Completion::Skipped);
        assert!(catalog.search_calls().is_empty());
        assert_eq!(finder.search().phase(), SearchPhase::Idle);
    }

    #[tokio::test]
    async fn test_search_and_paginate() {
        let (catalog, mut finder) = finder();
        catalog.push_search(Ok(SearchPage::new(
            vec![make_book("OL1W", "A"), make_book("OL2W", "B")],
            0,
            50,
        )));
        catalog.push_search(Ok(SearchPage::new(vec![make_book("OL3W", "C")], 2, 50)));

        finder.set_query("dune");
        assert_eq!(finder.submit().await, Completion::Applied);
        assert_eq!(finder.load_more().await, Completion::Applied);

        let titles: Vec<&str> = finder.search().books().iter().map(|b| b.title_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
        assert!(finder.search().has_more());
        assert_eq!(
            catalog.search_calls(),
            vec![SearchQuery::new("dune"), SearchQuery::new("dune").page(2)]
        );
    }

    #[tokio::test]
    async fn test_load_more_skipped_without_more() {
        let (catalog, mut finder) = finder();
        catalog.push_search(Ok(SearchPage::new(vec![make_book("OL1W", "A")], 0, 1)));

        finder.set_query("dune");
        finder.submit().await;
        assert_eq!(finder.load_more().await, Completion::Skipped);
        assert_eq!(catalog.search_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_open_and_close_detail() {
        let (catalog, mut finder) = finder();
        catalog.push_search(Ok(SearchPage::new(vec![make_book("OL1W", "Dune")], 0, 1)));
        catalog.push_work(Ok(WorkDetail {
            description: Some(Description::Text("Arrakis".into())),
            subjects: Some(vec!["Science fiction".into()]),
            ..Default::default()
        }));

        finder.set_query("dune");
        finder.submit().await;
        assert_eq!(finder.open(0).await, Completion::Applied);

        assert_eq!(catalog.work_calls(), vec!["/works/OL1W".to_string()]);
        assert_eq!(finder.detail().phase(), DetailPhase::Ready);
        assert_eq!(
            finder.detail().detail().and_then(WorkDetail::description_text),
            Some("Arrakis")
        );

        finder.close();
        assert_eq!(finder.detail().phase(), DetailPhase::Closed);
        assert!(finder.detail().selected().is_none());
    }

    #[tokio::test]
    async fn test_open_out_of_range() {
        let (catalog, mut finder) = finder();
        assert_eq!(finder.open(3).await, Completion::Skipped);
        assert!(catalog.work_calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_detail_falls_back() {
        let (catalog, mut finder) = finder();
        catalog.push_work(Err(CatalogError::Network("refused".into())));

        finder.open_book(make_book("OL7W", "Emma")).await;

        let detail = finder.detail().detail().unwrap();
        assert!(detail.is_unavailable());
        assert!(!finder.detail().is_loading());
    }

    #[tokio::test]
    async fn test_search_failure_surfaces_generic_error() {
        let (catalog, mut finder) = finder();
        catalog.push_search(Err(CatalogError::Parse("bad json".into())));

        finder.set_query("dune");
        finder.submit().await;

        assert_eq!(finder.search().error(), Some(SEARCH_FAILED_MESSAGE));
        assert!(!finder.search().is_loading());
    }
}
