//! Terminal display utilities for width-aware CLI output.

use std::io::{self, IsTerminal};
use std::sync::OnceLock;
use terminal_size::terminal_size;
use unicode_width::UnicodeWidthChar;

/// Terminal information with cached size and capabilities.
#[derive(Debug, Clone)]
pub struct Terminal {
    width: usize,
    is_tty: bool,
}

static TERMINAL_INFO: OnceLock<Terminal> = OnceLock::new();

/// Default width when terminal size cannot be determined.
pub const DEFAULT_WIDTH: usize = 100;

/// Get the global terminal information, initialized on first call.
pub fn terminal_info() -> &'static Terminal {
    TERMINAL_INFO.get_or_init(|| Terminal {
        width: terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(DEFAULT_WIDTH),
        is_tty: io::stdout().is_terminal(),
    })
}

/// Get the current terminal width in characters.
#[inline]
pub fn terminal_width() -> usize {
    terminal_info().width
}

/// Check if stdout is a terminal.
#[inline]
pub fn is_terminal() -> bool {
    terminal_info().is_tty
}

fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(1)
}

/// Display width of a string in terminal columns.
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Truncate text to fit within `max_width` columns, appending an ellipsis
/// if anything was cut.
///
/// # Examples
///
/// ```
/// use book_finder::utils::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("Hello World", 8), "Hello...");
/// assert_eq!(truncate_with_ellipsis("Hi", 8), "Hi");
/// ```
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    if display_width(text) <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut used = 0;
    let mut truncated = String::new();
    for c in text.chars() {
        let w = char_width(c);
        if used + w > budget {
            break;
        }
        used += w;
        truncated.push(c);
    }

    format!("{}...", truncated)
}

/// Truncate text at the last word boundary that fits, falling back to
/// [`truncate_with_ellipsis`] when there is none.
pub fn truncate_at_word(text: &str, max_width: usize) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }

    let cut = truncate_with_ellipsis(text, max_width);
    let kept = cut.trim_end_matches("...");
    match kept.rfind(' ') {
        // Only cut at the word if the next character was not already a space
        Some(pos) if pos > 0 && !text[kept.len()..].starts_with(' ') => {
            format!("{}...", kept[..pos].trim_end())
        }
        _ => cut,
    }
}

/// Column widths `(title, authors, year)` for the results table, leaving
/// room for the index column and borders.
pub fn book_table_columns(terminal_width: usize) -> (usize, usize, usize) {
    const YEAR: usize = 6;
    const CHROME: usize = 16;

    let available = terminal_width.saturating_sub(YEAR + CHROME).max(30);
    let title = (available * 3 / 5).clamp(20, 80);
    let authors = available.saturating_sub(title).clamp(10, 50);
    (title, authors, YEAR)
}
