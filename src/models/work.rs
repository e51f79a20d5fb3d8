//! Extended work metadata fetched for the detail view.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::de::lenient;

/// Description shown when a work's details could not be fetched
pub const DETAIL_UNAVAILABLE: &str = "Details not available.";

/// A work description: the catalog sends either a bare string or a typed
/// object carrying the text in `value`. A typed object without `value`
/// reads as an empty description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Typed {
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
        #[serde(default)]
        value: String,
    },
}

impl Description {
    pub fn text(&self) -> &str {
        match self {
            Description::Text(text) => text,
            Description::Typed { value, .. } => value,
        }
    }
}

/// Work detail record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkDetail {
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Description>,

    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub subjects: Option<Vec<String>>,

    /// Everything else the catalog returned
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl WorkDetail {
    /// Placeholder detail used when the fetch fails
    pub fn unavailable() -> Self {
        Self {
            description: Some(Description::Text(DETAIL_UNAVAILABLE.to_string())),
            ..Default::default()
        }
    }

    /// Description text, if any and non-empty
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_ref()
            .map(Description::text)
            .filter(|t| !t.trim().is_empty())
    }

    pub fn subjects(&self) -> &[String] {
        self.subjects.as_deref().unwrap_or_default()
    }

    /// Whether this is the fetch-failure placeholder
    pub fn is_unavailable(&self) -> bool {
        *self == Self::unavailable()
    }
}
