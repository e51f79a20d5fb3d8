use anyhow::{bail, Result};
use book_finder::catalog::{Catalog, OpenLibraryCatalog};
use book_finder::config::{find_config_file, load_config, to_toml, Config};
use book_finder::render::{DetailView, Renderer, ResultsView};
use book_finder::session::{BookFinder, SearchPhase};
use book_finder::ui::{self, shell, Spinner, Status};
use book_finder::utils::is_terminal;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Book Finder - search the Open Library catalog by title
#[derive(Parser, Debug)]
#[command(name = "book-finder")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search the Open Library catalog by title", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv, -vvv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log line format
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

/// Log line format on stderr
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for books by title
    #[command(alias = "s")]
    Search {
        /// Title to search for
        title: String,

        /// Number of result pages to fetch
        #[arg(long, short, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
    },

    /// Search for a title and show the details of one result
    #[command(alias = "o")]
    Open {
        /// Title to search for
        title: String,

        /// Result to open (1-based)
        #[arg(long, short, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        index: u64,
    },

    /// Interactive search shell (default)
    #[command(alias = "b")]
    Browse,

    /// Print the effective configuration as TOML
    Config,
}

fn init_tracing(cli: &Cli) {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    let (text, json) = match cli.log_format {
        LogFormat::Text => (
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("book_finder={}", env_filter)),
        ))
        .with(text)
        .with(json)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }
    let config = load_config(config_path.as_deref())?;

    let format = resolve_format(cli.output);
    let show_spinner = is_terminal() && !cli.quiet && format != OutputFormat::Json;

    match cli.command.unwrap_or(Commands::Browse) {
        Commands::Search { title, pages } => {
            let (mut finder, renderer) = build(&config)?;
            run_search(&mut finder, &title, pages, show_spinner).await?;

            let view = renderer.results(finder.search());
            output_results(&view, format, cli.quiet)?;

            if finder.search().phase() == SearchPhase::Failed {
                std::process::exit(1);
            }
        }

        Commands::Open { title, index } => {
            let (mut finder, renderer) = build(&config)?;
            run_search(&mut finder, &title, 1, show_spinner).await?;

            if let Some(error) = finder.search().error() {
                bail!("{}", error);
            }
            let found = finder.search().books().len();
            let position = usize::try_from(index - 1)?;
            if position >= found {
                bail!(
                    "No result #{} for \"{}\" ({} on the first page)",
                    index,
                    title.trim(),
                    found
                );
            }

            let spinner = spinner("Loading details...", show_spinner);
            finder.open(position).await;
            spinner.finish();

            if let Some(view) = renderer.detail_view(finder.detail()) {
                output_detail(&view, format)?;
            }
        }

        Commands::Browse => {
            let (mut finder, renderer) = build(&config)?;
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let show_spinner = is_terminal() && !cli.quiet;

            tokio::select! {
                result = shell::run(&mut finder, &renderer, stdin, show_spinner) => result?,
                _ = tokio::signal::ctrl_c() => println!(),
            }
        }

        Commands::Config => {
            print!("{}", to_toml(&config)?);
        }
    }

    Ok(())
}

fn build(config: &Config) -> Result<(BookFinder, Renderer)> {
    let catalog = OpenLibraryCatalog::from_config(&config.catalog)?;
    tracing::info!("Using catalog at {}", catalog.base_url());

    let catalog: Arc<dyn Catalog> = Arc::new(catalog);
    let finder = BookFinder::new(catalog);
    tracing::debug!(
        "Catalog {} ({}) ready",
        finder.catalog().name(),
        finder.catalog().id()
    );
    Ok((finder, Renderer::new(config)))
}

fn spinner(msg: &str, show: bool) -> Spinner {
    if show {
        Spinner::new(msg)
    } else {
        Spinner::hidden()
    }
}

/// Fresh search, then up to `pages - 1` further pages while more are available.
async fn run_search(
    finder: &mut BookFinder,
    title: &str,
    pages: u32,
    show_spinner: bool,
) -> Result<()> {
    if title.trim().is_empty() {
        bail!("Title must not be empty");
    }

    finder.set_query(title);
    let spinner = spinner("Searching...", show_spinner);
    finder.submit().await;

    for _ in 1..pages {
        if !finder.search().can_load_more() {
            break;
        }
        finder.load_more().await;
    }
    spinner.finish();

    Ok(())
}

fn resolve_format(format: OutputFormat) -> OutputFormat {
    if format == OutputFormat::Auto {
        if is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    }
}

fn output_results(view: &ResultsView, format: OutputFormat, quiet: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(view)?);
        }
        OutputFormat::Plain => {
            for card in &view.cards {
                println!(
                    "{}. {} - {} ({})",
                    card.index, card.title, card.authors, card.first_published
                );
                println!("  Subjects: {}", card.subjects);
                println!("  Cover: {}", card.cover_url);
                if let Some(key) = &card.key {
                    println!("  Key: {}", key);
                }
                println!();
            }
            if let Some(error) = &view.error {
                eprintln!("{}", error);
            }
        }
        OutputFormat::Table | OutputFormat::Auto => {
            if !view.cards.is_empty() {
                ui::print_results_table(&view.cards);
            }
            if quiet {
                if let Some(error) = &view.error {
                    eprintln!("{}", error);
                }
            } else {
                ui::print_results_footer(view, "Use --pages to fetch more results.");
            }
        }
    }
    Ok(())
}

fn output_detail(view: &DetailView, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(view)?);
        }
        OutputFormat::Plain => {
            println!("{}", view.title);
            println!("{}", view.authors);
            println!("First Published: {}", view.first_published);
            println!("Cover: {}", view.cover_url);
            if let Some(description) = &view.description {
                println!();
                println!("{}", description);
            }
            if let Some(subjects) = &view.subjects {
                println!();
                println!("Subjects: {}", subjects);
            }
        }
        OutputFormat::Table | OutputFormat::Auto => {
            ui::print_detail(view);
            if view.loading {
                ui::print_status(Status::Warning, "Details did not finish loading.");
            }
        }
    }
    Ok(())
}
