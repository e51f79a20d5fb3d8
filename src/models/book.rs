//! Book record as returned by the catalog search endpoint.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::de::lenient;

/// A single search hit from the catalog
///
/// Every field is optional: the catalog omits whatever it does not know, a
/// field of the wrong type reads as missing, and renderers substitute
/// placeholders. Fields this crate does not model are
/// kept in `extra` so the record round-trips unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookDoc {
    /// Work key, path-style (e.g. `/works/OL82563W`)
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub key: Option<String>,

    /// Title of the work
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,

    /// Author display names
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub author_name: Option<Vec<String>>,

    /// Year of first publication
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub first_publish_year: Option<i32>,

    /// Numeric cover identifier
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub cover_i: Option<u64>,

    /// Subject headings
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub subject: Option<Vec<String>>,

    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl BookDoc {
    /// Title, or an empty string when the record has none
    pub fn title_str(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Author names, empty when the record has none
    pub fn authors(&self) -> &[String] {
        self.author_name.as_deref().unwrap_or_default()
    }

    /// Subject headings, empty when the record has none
    pub fn subjects(&self) -> &[String] {
        self.subject.as_deref().unwrap_or_default()
    }

    /// Work key with surrounding whitespace removed, if present and non-empty
    pub fn work_key(&self) -> Option<&str> {
        self.key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

/// Builder for constructing BookDoc values
#[derive(Debug, Clone, Default)]
pub struct BookDocBuilder {
    doc: BookDoc,
}

impl BookDocBuilder {
    /// Start a record with the given work key
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            doc: BookDoc {
                key: Some(key.into()),
                ..Default::default()
            },
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.doc.title = Some(title.into());
        self
    }

    /// Append an author name
    pub fn author(mut self, name: impl Into<String>) -> Self {
        self.doc
            .author_name
            .get_or_insert_with(Vec::new)
            .push(name.into());
        self
    }

    pub fn first_publish_year(mut self, year: i32) -> Self {
        self.doc.first_publish_year = Some(year);
        self
    }

    pub fn cover_id(mut self, cover_id: u64) -> Self {
        self.doc.cover_i = Some(cover_id);
        self
    }

    /// Append a subject heading
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.doc
            .subject
            .get_or_insert_with(Vec::new)
            .push(subject.into());
        self
    }

    pub fn build(self) -> BookDoc {
        self.doc
    }
}
