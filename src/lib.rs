//! # Book Finder
//!
//! Search the Open Library catalog by title, page through the results and
//! open any book for its description and subjects.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Catalog records (BookDoc, SearchPage, WorkDetail)
//! - [`catalog`]: The [`Catalog`] trait and its Open Library backend
//! - [`session`]: Search and detail state, and the [`BookFinder`] driver
//! - [`render`]: View models for cards and the detail view
//! - [`ui`]: Terminal output and the interactive shell
//! - [`utils`]: HTTP client and display helpers
//! - [`config`]: Configuration management

pub mod catalog;
pub mod config;
pub mod models;
pub mod render;
pub mod session;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError, OpenLibraryCatalog};
pub use models::{BookDoc, WorkDetail};
pub use session::BookFinder;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
