//! Search request and response models.

use serde::{Deserialize, Serialize};

use super::de::lenient_vec;
use super::BookDoc;

/// Parameters of a single title search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Title text to search for
    pub title: String,

    /// 1-based result page
    pub page: u32,
}

impl SearchQuery {
    /// Create a query for the first page
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            page: 1,
        }
    }

    /// Set the page
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}

/// One page of search results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Records on this page, in relevance order. Entries that are not
    /// records are skipped.
    #[serde(default, deserialize_with = "lenient_vec")]
    pub docs: Vec<BookDoc>,

    /// Offset of the first record on this page
    #[serde(default)]
    pub start: u64,

    /// Total number of matching records
    #[serde(rename = "numFound", default)]
    pub num_found: u64,
}

impl SearchPage {
    /// Create a page from its parts
    pub fn new(docs: Vec<BookDoc>, start: u64, num_found: u64) -> Self {
        Self {
            docs,
            start,
            num_found,
        }
    }

    /// Whether the catalog holds records past this page
    pub fn has_more(&self) -> bool {
        self.start.saturating_add(self.docs.len() as u64) < self.num_found
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}
