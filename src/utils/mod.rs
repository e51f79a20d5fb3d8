//! Utility modules supporting catalog access and terminal output.
//!
//! - [`HttpClient`]: shared reqwest client built from [`HttpOptions`]
//! - [`truncate_with_ellipsis`] / [`truncate_at_word`]: width-aware truncation
//! - [`terminal_width`] / [`is_terminal`]: cached terminal capabilities
//!
//! # HTTP Client
//!
//! ```rust,no_run
//! use book_finder::utils::{HttpClient, HttpOptions};
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::with_options(&HttpOptions {
//!     timeout: Some(Duration::from_secs(20)),
//!     ..Default::default()
//! })?;
//! # let _ = client;
//! # Ok(())
//! # }
//! ```

mod display;
mod http;

pub use display::{
    book_table_columns, display_width, is_terminal, terminal_width, truncate_at_word,
    truncate_with_ellipsis,
};
pub use http::{HttpClient, HttpOptions, DEFAULT_USER_AGENT};
