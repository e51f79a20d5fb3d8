//! View models for result cards and the detail view.
//!
//! Pure functions of session state: placeholders for missing fields, cover
//! URL derivation and subject truncation live here so every front end shows
//! the same thing.

use serde::Serialize;

use crate::config::{Config, CoverConfig, DisplayConfig};
use crate::models::{BookDoc, WorkDetail};
use crate::session::{DetailSession, SearchPhase, SearchSession};

/// Author line on a card when the record has no authors
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Author line in the detail header when the record has no authors
pub const UNKNOWN_AUTHOR_DETAIL: &str = "Unknown Author";

/// Metadata placeholder
pub const NOT_AVAILABLE: &str = "N/A";

/// Detail text when the work has no description
pub const NO_DESCRIPTION: &str = "No description available.";

/// Results area before anything has been found
pub const EMPTY_RESULTS: &str = "No books found. Try searching!";

/// Cover image URL for a record, or the placeholder when it has no cover id.
/// A cover id of 0 counts as none.
pub fn cover_url(cover_id: Option<u64>, covers: &CoverConfig) -> String {
    match cover_id {
        Some(id) if id != 0 => format!(
            "{}/b/id/{}-{}.jpg",
            covers.base_url.trim_end_matches('/'),
            id,
            covers.size.suffix()
        ),
        _ => covers.placeholder.clone(),
    }
}

/// Authors joined with commas, `None` when there are none
pub fn join_authors(authors: &[String]) -> Option<String> {
    if authors.is_empty() {
        None
    } else {
        Some(authors.join(", "))
    }
}

/// The first `limit` subjects joined with commas, `None` when there are none
pub fn subject_line(subjects: &[String], limit: usize) -> Option<String> {
    let shown: Vec<&str> = subjects.iter().take(limit).map(String::as_str).collect();
    if shown.is_empty() {
        None
    } else {
        Some(shown.join(", "))
    }
}

/// A result card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookCard {
    /// 1-based position in the result list
    pub index: usize,
    pub title: String,
    pub authors: String,
    pub first_published: String,
    pub subjects: String,
    pub cover_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// The detail view of the selected record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub title: String,
    pub authors: String,
    pub first_published: String,
    pub cover_url: String,
    pub loading: bool,
    /// Description text; `None` while loading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Truncated subject list from the work record, if it has any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subjects: Option<String>,
}

/// Everything shown around the results area
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsView {
    pub cards: Vec<BookCard>,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Placeholder shown when nothing has been searched yet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Whether a "load more" action is offered
    pub more_available: bool,
}

/// Builds view models with the configured cover host and limits
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    covers: CoverConfig,
    display: DisplayConfig,
}

impl Renderer {
    pub fn new(config: &Config) -> Self {
        Self {
            covers: config.covers.clone(),
            display: config.display.clone(),
        }
    }

    /// Card for the record at 0-based `position`
    pub fn card(&self, position: usize, book: &BookDoc) -> BookCard {
        BookCard {
            index: position + 1,
            title: book.title_str().to_string(),
            authors: join_authors(book.authors()).unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            first_published: year_or_na(book.first_publish_year),
            subjects: subject_line(book.subjects(), self.display.card_subject_limit)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            cover_url: cover_url(book.cover_i, &self.covers),
            key: book.work_key().map(str::to_string),
        }
    }

    pub fn cards(&self, books: &[BookDoc]) -> Vec<BookCard> {
        books
            .iter()
            .enumerate()
            .map(|(i, book)| self.card(i, book))
            .collect()
    }

    pub fn results(&self, session: &SearchSession) -> ResultsView {
        let placeholder = (session.phase() == SearchPhase::Idle && session.books().is_empty())
            .then(|| EMPTY_RESULTS.to_string());

        ResultsView {
            cards: self.cards(session.books()),
            loading: session.is_loading(),
            error: session.error().map(str::to_string),
            placeholder,
            more_available: session.can_load_more(),
        }
    }

    /// Detail view for a selected record and whatever detail has arrived
    pub fn detail(&self, book: &BookDoc, detail: Option<&WorkDetail>, loading: bool) -> DetailView {
        let (description, subjects) = match (loading, detail) {
            (false, Some(detail)) => (
                Some(
                    detail
                        .description_text()
                        .unwrap_or(NO_DESCRIPTION)
                        .to_string(),
                ),
                subject_line(detail.subjects(), self.display.detail_subject_limit),
            ),
            _ => (None, None),
        };

        DetailView {
            title: book.title_str().to_string(),
            authors: join_authors(book.authors())
                .unwrap_or_else(|| UNKNOWN_AUTHOR_DETAIL.to_string()),
            first_published: year_or_na(book.first_publish_year),
            cover_url: cover_url(book.cover_i, &self.covers),
            loading,
            description,
            subjects,
        }
    }

    /// Detail view of a session, `None` when it is closed
    pub fn detail_view(&self, session: &DetailSession) -> Option<DetailView> {
        session
            .selected()
            .map(|book| self.detail(book, session.detail(), session.is_loading()))
    }
}

fn year_or_na(year: Option<i32>) -> String {
    year.map(|y| y.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogError;
    use crate::config::CoverSize;
    use crate::models::{BookDocBuilder, Description, SearchPage};

    fn renderer() -> Renderer {
        Renderer::new(&Config::default())
    }

    #[test]
    fn test_cover_url() {
        let covers = CoverConfig::default();
        assert_eq!(
            cover_url(Some(11481354), &covers),
            "https://covers.openlibrary.org/b/id/11481354-M.jpg"
        );
        assert_eq!(cover_url(None, &covers), "https://via.placeholder.com/150");
        assert_eq!(cover_url(Some(0), &covers), "https://via.placeholder.com/150");

        let large = CoverConfig {
            size: CoverSize::Large,
            base_url: "http://covers.local/".into(),
            ..Default::default()
        };
        assert_eq!(cover_url(Some(7), &large), "http://covers.local/b/id/7-L.jpg");
    }

    #[test]
    fn test_join_authors() {
        assert_eq!(join_authors(&[]), None);
        assert_eq!(
            join_authors(&["Terry Pratchett".into(), "Neil Gaiman".into()]),
            Some("Terry Pratchett, Neil Gaiman".to_string())
        );
    }

    #[test]
    fn test_subject_line_truncates() {
        let subjects: Vec<String> = (1..=10).map(|i| format!("s{}", i)).collect();
        assert_eq!(subject_line(&subjects, 5), Some("s1, s2, s3, s4, s5".to_string()));
        assert_eq!(subject_line(&subjects[..2], 8), Some("s1, s2".to_string()));
        assert_eq!(subject_line(&[], 8), None);
    }

    #[test]
    fn test_card_placeholders() {
        let book = BookDocBuilder::default().build();
        let card = renderer().card(0, &book);

        assert_eq!(card.index, 1);
        assert_eq!(card.title, "");
        assert_eq!(card.authors, UNKNOWN_AUTHOR);
        assert_eq!(card.first_published, NOT_AVAILABLE);
        assert_eq!(card.subjects, NOT_AVAILABLE);
        assert_eq!(card.cover_url, "https://via.placeholder.com/150");
        assert_eq!(card.key, None);
    }

    #[test]
    fn test_card_full_record() {
        let book = BookDocBuilder::new("/works/OL893415W")
            .title("Dune")
            .author("Frank Herbert")
            .first_publish_year(1965)
            .cover_id(11481354)
            .subject("Science fiction")
            .build();
        let card = renderer().card(2, &book);

        assert_eq!(card.index, 3);
        assert_eq!(card.authors, "Frank Herbert");
        assert_eq!(card.first_published, "1965");
        assert_eq!(card.subjects, "Science fiction");
        assert!(card.cover_url.ends_with("/b/id/11481354-M.jpg"));
    }

    #[test]
    fn test_detail_while_loading_has_no_body() {
        let book = BookDocBuilder::new("/works/OL1W").title("Dune").build();
        let view = renderer().detail(&book, None, true);

        assert!(view.loading);
        assert_eq!(view.authors, UNKNOWN_AUTHOR_DETAIL);
        assert_eq!(view.description, None);
        assert_eq!(view.subjects, None);
    }

    #[test]
    fn test_detail_description_and_subjects() {
        let book = BookDocBuilder::new("/works/OL1W").title("Dune").build();
        let detail = WorkDetail {
            description: Some(Description::Typed {
                kind: Some("/type/text".into()),
                value: "Arrakis.".into(),
            }),
            subjects: Some((1..=12).map(|i| format!("s{}", i)).collect()),
            ..Default::default()
        };
        let view = renderer().detail(&book, Some(&detail), false);

        assert_eq!(view.description.as_deref(), Some("Arrakis."));
        assert_eq!(
            view.subjects.as_deref(),
            Some("s1, s2, s3, s4, s5, s6, s7, s8")
        );
    }

    #[test]
    fn test_detail_without_description() {
        let book = BookDocBuilder::new("/works/OL1W").build();
        let view = renderer().detail(&book, Some(&WorkDetail::default()), false);
        assert_eq!(view.description.as_deref(), Some(NO_DESCRIPTION));
        assert_eq!(view.subjects, None);
    }

    #[test]
    fn test_results_view_states() {
        let renderer = renderer();
        let mut session = SearchSession::new();

        let idle = renderer.results(&session);
        assert_eq!(idle.placeholder.as_deref(), Some(EMPTY_RESULTS));
        assert!(!idle.more_available);

        session.set_query("dune");
        let ticket = session.submit().unwrap();
        assert!(renderer.results(&session).loading);

        session.complete(
            ticket,
            Ok(SearchPage::new(
                vec![BookDocBuilder::new("/works/OL1W").title("Dune").build()],
                0,
                9,
            )),
        );
        let loaded = renderer.results(&session);
        assert_eq!(loaded.cards.len(), 1);
        assert!(loaded.more_available);
        assert_eq!(loaded.placeholder, None);

        let ticket = session.submit().unwrap();
        session.complete(ticket, Err(CatalogError::Network("down".into())));
        let failed = renderer.results(&session);
        assert_eq!(failed.cards.len(), 1);
        assert!(failed.error.is_some());
    }
}
