//! Detail state: the selected record and its on-demand work metadata.

use crate::catalog::CatalogError;
use crate::models::{BookDoc, WorkDetail};
use crate::session::Completion;

/// Detail view state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailPhase {
    Closed,
    Loading,
    Ready,
}

/// A work lookup handed out by [`DetailSession::select`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    seq: u64,
    key: String,
}

impl DetailTicket {
    /// Work key to fetch
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Holds at most one open detail view.
#[derive(Debug, Clone, Default)]
pub struct DetailSession {
    selected: Option<BookDoc>,
    detail: Option<WorkDetail>,
    loading: bool,
    seq: u64,
}

impl DetailSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&BookDoc> {
        self.selected.as_ref()
    }

    pub fn detail(&self) -> Option<&WorkDetail> {
        self.detail.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn phase(&self) -> DetailPhase {
        match (&self.selected, self.loading) {
            (None, _) => DetailPhase::Closed,
            (Some(_), true) => DetailPhase::Loading,
            (Some(_), false) => DetailPhase::Ready,
        }
    }

    /// Open the detail view for a record.
    ///
    /// Any previously loaded detail is cleared first. A record without a
    /// work key resolves straight to the "unavailable" detail and no ticket
    /// is returned.
    pub fn select(&mut self, book: BookDoc) -> Option<DetailTicket> {
        self.seq += 1;
        self.detail = None;

        let key = book.work_key().map(str::to_string);
        self.selected = Some(book);

        match key {
            Some(key) => {
                tracing::debug!("Detail #{} for {}", self.seq, key);
                self.loading = true;
                Some(DetailTicket { seq: self.seq, key })
            }
            None => {
                tracing::warn!("Selected record has no work key");
                self.detail = Some(WorkDetail::unavailable());
                self.loading = false;
                None
            }
        }
    }

    /// Apply the catalog's answer to a ticket. Failures become the
    /// "unavailable" placeholder.
    pub fn complete(
        &mut self,
        ticket: DetailTicket,
        result: Result<WorkDetail, CatalogError>,
    ) -> Completion {
        if ticket.seq != self.seq || self.selected.is_none() {
            tracing::debug!("Dropping stale detail response for {}", ticket.key);
            return Completion::Stale;
        }

        let detail = result.unwrap_or_else(|err| {
            tracing::warn!("Detail lookup for {} failed: {}", ticket.key, err);
            WorkDetail::unavailable()
        });

        self.detail = Some(detail);
        self.loading = false;
        Completion::Applied
    }

    /// Close the detail view, dropping any response still in flight.
    pub fn dismiss(&mut self) {
        self.seq += 1;
        self.selected = None;
        self.detail = None;
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::mock::make_book;
    use crate::models::{BookDocBuilder, Description};

    fn detail(text: &str) -> WorkDetail {
        WorkDetail {
            description: Some(Description::Text(text.to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_select_then_complete() {
        let mut session = DetailSession::new();
        assert_eq!(session.phase(), DetailPhase::Closed);

        let ticket = session.select(make_book("OL1W", "Dune")).unwrap();
        assert_eq!(ticket.key(), "/works/OL1W");
        assert_eq!(session.phase(), DetailPhase::Loading);
        assert!(session.detail().is_none());

        assert_eq!(
            session.complete(ticket, Ok(detail("Arrakis"))),
            Completion::Applied
        );
        assert_eq!(session.phase(), DetailPhase::Ready);
        assert_eq!(
            session.detail().and_then(WorkDetail::description_text),
            Some("Arrakis")
        );
    }

    #[test]
    fn test_select_clears_previous_detail() {
        let mut session = DetailSession::new();
        let ticket = session.select(make_book("OL1W", "Dune")).unwrap();
        session.complete(ticket, Ok(detail("Arrakis")));

        let _ticket = session.select(make_book("OL2W", "Emma")).unwrap();
        assert!(session.detail().is_none());
        assert_eq!(session.selected().map(BookDoc::title_str), Some("Emma"));
        assert!(session.is_loading());
    }

    #[test]
    fn test_failure_yields_fallback() {
        let mut session = DetailSession::new();
        let ticket = session.select(make_book("OL1W", "Dune")).unwrap();
        session.complete(ticket, Err(CatalogError::Api { status: 500 }));

        let detail = session.detail().unwrap();
        assert!(detail.is_unavailable());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_missing_key_resolves_immediately() {
        let mut session = DetailSession::new();
        let book = BookDocBuilder::default().title("Keyless").build();

        assert!(session.select(book).is_none());
        assert_eq!(session.phase(), DetailPhase::Ready);
        assert!(session.detail().unwrap().is_unavailable());
    }

    #[test]
    fn test_dismiss_clears_everything() {
        let mut session = DetailSession::new();
        let ticket = session.select(make_book("OL1W", "Dune")).unwrap();
        session.complete(ticket, Ok(detail("Arrakis")));

        session.dismiss();
        assert!(session.selected().is_none());
        assert!(session.detail().is_none());
        assert_eq!(session.phase(), DetailPhase::Closed);
    }

    #[test]
    fn test_dismiss_while_loading_drops_late_response() {
        let mut session = DetailSession::new();
        let ticket = session.select(make_book("OL1W", "Dune")).unwrap();
        session.dismiss();

        assert_eq!(
            session.complete(ticket, Ok(detail("late"))),
            Completion::Stale
        );
        assert_eq!(session.phase(), DetailPhase::Closed);
        assert!(session.detail().is_none());
    }

    #[test]
    fn test_late_response_for_previous_selection_is_dropped() {
        let mut session = DetailSession::new();
        let first = session.select(make_book("OL1W", "Dune")).unwrap();
        let second = session.select(make_book("OL2W", "Emma")).unwrap();

        assert_eq!(session.complete(first, Ok(detail("Dune text"))), Completion::Stale);
        assert!(session.is_loading());

        session.complete(second, Ok(detail("Emma text")));
        assert_eq!(
            session.detail().and_then(WorkDetail::description_text),
            Some("Emma text")
        );
    }
}
