//! Interactive shell: a line-oriented front end over [`BookFinder`].
//!
//! Any line that does not start with `/` becomes the query and is submitted.
//! Commands:
//!
//! - `/more` load the next page
//! - `/open <n>` open result `n` (1-based)
//! - `/close` close the detail view
//! - `/help`, `/quit`

use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::render::Renderer;
use crate::session::{BookFinder, Completion};
use crate::ui::{self, Spinner, Status};

const MORE_HINT: &str = "Type /more to load more results.";

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Set the query to this text and submit it
    Search(String),
    More,
    /// Open a result by its 1-based position
    Open(usize),
    Close,
    Help,
    Quit,
    Unknown(String),
}

/// Parse one input line
pub fn parse_command(line: &str) -> ShellCommand {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix('/') else {
        let text = line.trim_end_matches(|c: char| c == '\r' || c == '\n');
        return ShellCommand::Search(text.to_string());
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("more" | "m"), None, None) => ShellCommand::More,
        (Some("open" | "o"), Some(n), None) => match n.parse::<usize>() {
            Ok(n) if n > 0 => ShellCommand::Open(n),
            _ => ShellCommand::Unknown(trimmed.to_string()),
        },
        (Some("close" | "c"), None, None) => ShellCommand::Close,
        (Some("help" | "h" | "?"), None, None) => ShellCommand::Help,
        (Some("quit" | "q" | "exit"), None, None) => ShellCommand::Quit,
        _ => ShellCommand::Unknown(trimmed.to_string()),
    }
}

fn print_help() {
    println!("  <title>      search for a title");
    println!("  /more        load more results");
    println!("  /open <n>    show details for result n");
    println!("  /close       close the details view");
    println!("  /help        show this help");
    println!("  /quit        exit");
}

fn prompt() -> std::io::Result<()> {
    print!("> ");
    std::io::stdout().flush()
}

fn spinner(msg: &str, show: bool) -> Spinner {
    if show {
        Spinner::new(msg)
    } else {
        Spinner::hidden()
    }
}

/// Run the shell until `/quit` or end of input
pub async fn run<R>(
    finder: &mut BookFinder,
    renderer: &Renderer,
    input: R,
    show_spinner: bool,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    ui::print_banner();
    let mut lines = input.lines();

    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match parse_command(&line) {
            ShellCommand::Search(query) => {
                finder.set_query(query);
                let spinner = spinner("Searching...", show_spinner);
                let completion = finder.submit().await;
                spinner.finish();

                if completion == Completion::Applied {
                    let view = renderer.results(finder.search());
                    if !view.cards.is_empty() && view.error.is_none() {
                        ui::print_cards(&view.cards);
                    }
                    ui::print_results_footer(&view, MORE_HINT);
                }
            }
            ShellCommand::More => {
                if !finder.search().can_load_more() {
                    ui::print_status(Status::Info, "No more results.");
                    continue;
                }
                let shown = finder.search().books().len();
                let spinner = spinner("Loading more...", show_spinner);
                finder.load_more().await;
                spinner.finish();

                let view = renderer.results(finder.search());
                ui::print_cards(view.cards.get(shown..).unwrap_or_default());
                ui::print_results_footer(&view, MORE_HINT);
            }
            ShellCommand::Open(n) => {
                if n > finder.search().books().len() {
                    ui::print_status(Status::Warning, &format!("No result #{}.", n));
                    continue;
                }
                let spinner = spinner("Loading details...", show_spinner);
                finder.open(n - 1).await;
                spinner.finish();

                if let Some(view) = renderer.detail_view(finder.detail()) {
                    ui::print_detail(&view);
                }
            }
            ShellCommand::Close => {
                finder.close();
                ui::print_status(Status::Success, "Details closed.");
            }
            ShellCommand::Help => print_help(),
            ShellCommand::Quit => break,
            ShellCommand::Unknown(cmd) => {
                ui::print_status(Status::Warning, &format!("Unknown command: {}", cmd));
            }
        }
    }

    Ok(())
}
