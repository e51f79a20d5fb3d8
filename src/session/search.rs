//! Search state: the query text, page cursor, accumulated results and the
//! loading/error flags shown around the results area.

use crate::catalog::CatalogError;
use crate::models::{BookDoc, SearchPage, SearchQuery};
use crate::session::Completion;

/// Shown when a fresh search returns no records
pub const NO_RESULTS_MESSAGE: &str = "No books found. Try a different title.";

/// Shown when a search request fails in transport or parsing
pub const SEARCH_FAILED_MESSAGE: &str = "Something went wrong. Please try again.";

/// Where the current search session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Nothing searched yet
    Idle,
    /// A request is in flight
    Loading,
    /// Results are shown
    Loaded,
    /// The last fresh search matched nothing
    NoResults,
    /// The last request failed
    Failed,
}

/// Whether a request starts a new result set or extends the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Fresh,
    More,
}

/// A search request handed out by [`SearchSession`], to be completed with
/// the catalog's response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    kind: FetchKind,
    query: SearchQuery,
}

impl SearchTicket {
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn kind(&self) -> FetchKind {
        self.kind
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Search-side state holder.
///
/// Transitions are split in two: [`submit`](Self::submit) and
/// [`load_more`](Self::load_more) update the flags and return a ticket,
/// [`complete`](Self::complete) applies the response. Only the most recently
/// issued ticket is applied; older ones are dropped as stale.
#[derive(Debug, Clone)]
pub struct SearchSession {
    query: String,
    active_query: Option<String>,
    page: u32,
    /// Search and last page the shown books came from
    shown_query: Option<String>,
    shown_page: u32,
    books: Vec<BookDoc>,
    has_more: bool,
    error: Option<String>,
    phase: SearchPhase,
    seq: u64,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self {
            query: String::new(),
            active_query: None,
            page: 1,
            shown_query: None,
            shown_page: 1,
            books: Vec::new(),
            has_more: false,
            error: None,
            phase: SearchPhase::Idle,
            seq: 0,
        }
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current query text as typed
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query text. Never triggers a request.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Title of the search that load-more continues: the one in flight, or
    /// the one the shown books came from
    pub fn active_query(&self) -> Option<&str> {
        self.active_query.as_deref()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn books(&self) -> &[BookDoc] {
        &self.books
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SearchPhase::Loading
    }

    /// Whether a load-more request would be issued right now
    pub fn can_load_more(&self) -> bool {
        self.has_more && !self.is_loading() && self.active_query.is_some()
    }

    /// Start a fresh search for the current query.
    ///
    /// Returns `None` without touching any state when the query is empty
    /// after trimming.
    pub fn submit(&mut self) -> Option<SearchTicket> {
        let title = self.query.trim();
        if title.is_empty() {
            return None;
        }
        let title = title.to_string();

        self.seq += 1;
        self.page = 1;
        self.error = None;
        self.phase = SearchPhase::Loading;
        self.active_query = Some(title.clone());

        tracing::debug!("Search #{} for {:?}", self.seq, title);

        Some(SearchTicket {
            seq: self.seq,
            kind: FetchKind::Fresh,
            query: SearchQuery::new(title),
        })
    }

    /// Request the next page of the active search.
    ///
    /// Returns `None` unless more results are available and nothing is in
    /// flight.
    pub fn load_more(&mut self) -> Option<SearchTicket> {
        if !self.can_load_more() {
            return None;
        }
        let title = self.active_query.clone()?;

        self.seq += 1;
        self.page += 1;
        self.error = None;
        self.phase = SearchPhase::Loading;

        tracing::debug!("Search #{} for {:?}, page {}", self.seq, title, self.page);

        Some(SearchTicket {
            seq: self.seq,
            kind: FetchKind::More,
            query: SearchQuery::new(title).page(self.page),
        })
    }

    /// Apply the catalog's answer to a ticket.
    pub fn complete(
        &mut self,
        ticket: SearchTicket,
        result: Result<SearchPage, CatalogError>,
    ) -> Completion {
        if ticket.seq() != self.seq {
            tracing::debug!(
                "Dropping stale search response #{} (latest is #{})",
                ticket.seq(),
                self.seq
            );
            return Completion::Stale;
        }

        match (ticket.kind, result) {
            (kind, Err(err)) => {
                tracing::warn!("Search for {:?} failed: {}", ticket.query.title, err);
                self.error = Some(SEARCH_FAILED_MESSAGE.to_string());
                // Load-more keeps extending the books still shown
                self.page = self.shown_page;
                if kind == FetchKind::Fresh {
                    self.active_query = self.shown_query.clone();
                }
                self.phase = SearchPhase::Failed;
            }
            (FetchKind::Fresh, Ok(page)) if page.is_empty() => {
                self.error = Some(NO_RESULTS_MESSAGE.to_string());
                self.books.clear();
                self.has_more = false;
                self.shown_query = Some(ticket.query.title);
                self.shown_page = 1;
                self.phase = SearchPhase::NoResults;
            }
            (FetchKind::Fresh, Ok(page)) => {
                self.has_more = page.has_more();
                self.books = page.docs;
                self.shown_query = Some(ticket.query.title);
                self.shown_page = 1;
                self.phase = SearchPhase::Loaded;
            }
            (FetchKind::More, Ok(page)) => {
                self.has_more = page.has_more();
                self.books.extend(page.docs);
                self.shown_page = ticket.query.page;
                self.phase = SearchPhase::Loaded;
            }
        }

        Completion::Applied
    }
}
