//! Core data models for catalog records, search pages and work details.

mod book;
mod de;
mod search;
mod work;

pub use book::{BookDoc, BookDocBuilder};
pub use search::{SearchPage, SearchQuery};
pub use work::{Description, WorkDetail, DETAIL_UNAVAILABLE};
