//! Terminal UI: colored cards, the detail panel, the results table and the
//! loading spinner.

pub mod shell;

use owo_colors::OwoColorize;
use std::time::Duration;

use crate::render::{BookCard, DetailView, ResultsView};
use crate::utils::{
    book_table_columns, display_width, terminal_width, truncate_at_word, truncate_with_ellipsis,
};

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
        Status::Loading => "◐",
        Status::Search => "🔍",
    }
}

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Info,
    Loading,
    Search,
}

/// Print a styled status message.
pub fn print_status(status: Status, msg: &str) {
    let icon = status_icon(status);
    match status {
        Status::Success => println!("{} {}", icon.green().bold(), msg),
        Status::Error => println!("{} {}", icon.red().bold(), msg.red()),
        Status::Warning => println!("{} {}", icon.yellow().bold(), msg),
        Status::Info => println!("{} {}", icon.cyan().bold(), msg),
        Status::Loading => println!("{} {}", icon.cyan(), msg),
        Status::Search => println!("{} {}", icon.yellow(), msg),
    }
}

/// Welcome banner for the interactive shell.
pub fn print_banner() {
    println!();
    println!(
        "{} {}",
        "📚 Book Finder".blue().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("{}", "Type a title to search, /help for commands.".dimmed());
    println!();
}

/// Print a section header.
pub fn print_section(title: &str) {
    println!();
    println!("{}", format!("━━━ {} ━━━", title).bold().cyan());
}

/// Print a divider line.
pub fn print_divider() {
    println!("{}", "─".repeat(terminal_width().min(80)).dimmed());
}

/// Print a result card.
pub fn print_card(card: &BookCard) {
    let width = terminal_width().clamp(40, 80);
    let inner = width.saturating_sub(12);

    println!();
    println!(
        "{} {}",
        format!("{:>3}.", card.index).dimmed(),
        truncate_at_word(&card.title, inner).blue().bold()
    );
    println!("     {}", truncate_with_ellipsis(&card.authors, inner).green());
    println!(
        "     {} {}",
        "First Published:".dimmed(),
        card.first_published.yellow()
    );
    println!("     {} {}", "Cover:".dimmed(), card.cover_url.dimmed());
}

/// Print a list of cards.
pub fn print_cards(cards: &[BookCard]) {
    for card in cards {
        print_card(card);
    }
}

/// Print cards as a table.
pub fn print_results_table(cards: &[BookCard]) {
    use comfy_table::{Attribute, Cell, Table};

    let (title_width, authors_width, _) = book_table_columns(terminal_width());

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["#", "Title", "Authors", "Year"]);

    for card in cards {
        table.add_row(vec![
            Cell::new(card.index),
            Cell::new(truncate_at_word(&card.title, title_width)).add_attribute(Attribute::Bold),
            Cell::new(truncate_with_ellipsis(&card.authors, authors_width)),
            Cell::new(&card.first_published),
        ]);
    }
    println!("{table}");
}

/// Print the error line and pagination hint under the results.
pub fn print_results_footer(view: &ResultsView, more_hint: &str) {
    if let Some(placeholder) = &view.placeholder {
        print_status(Status::Info, placeholder);
    }
    if let Some(error) = &view.error {
        print_status(Status::Error, error);
    }
    if view.more_available {
        println!();
        println!("{}", more_hint.dimmed());
    }
}

/// Print the detail panel.
pub fn print_detail(view: &DetailView) {
    let width = terminal_width().clamp(40, 100);

    print_section(&truncate_at_word(&view.title, width.saturating_sub(10)));
    println!("{}", view.authors.green());
    println!(
        "{} {}",
        "First Published:".dimmed(),
        view.first_published.yellow()
    );

    if view.loading {
        print_status(Status::Loading, "Loading details...");
        return;
    }

    if let Some(description) = &view.description {
        println!();
        for line in wrap(description, width) {
            println!("{}", line);
        }
    }
    if let Some(subjects) = &view.subjects {
        println!();
        println!("{} {}", "Subjects:".bold(), subjects.dimmed());
    }
    print_divider();
}

/// Greedy word wrap on display width.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = display_width(&line) + 1 + display_width(word);
            if !line.is_empty() && candidate > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}

/// Loading spinner shown while a request is in flight.
pub struct Spinner {
    pb: indicatif::ProgressBar,
}

impl Spinner {
    /// Create a new spinner with the given message.
    pub fn new(msg: &str) -> Self {
        let pb = indicatif::ProgressBar::new_spinner();
        pb.set_style(
            indicatif::ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner())
                .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb }
    }

    /// A spinner that draws nothing, for non-interactive output.
    pub fn hidden() -> Self {
        Self {
            pb: indicatif::ProgressBar::hidden(),
        }
    }

    /// Remove the spinner from the terminal.
    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_icon() {
        assert_eq!(status_icon(Status::Success), "✓");
        assert_eq!(status_icon(Status::Error), "✗");
        assert_eq!(status_icon(Status::Search), "🔍");
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("a bb ccc", 4), vec!["a bb", "ccc"]);
        assert_eq!(wrap("one\n\ntwo", 80), vec!["one", "", "two"]);
        assert_eq!(wrap("", 10), Vec::<String>::new());
    }
}
