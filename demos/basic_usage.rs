//! Basic usage example for the Book Finder library.
//!
//! Searches Open Library for a title, fetches a second page when there is
//! one, and prints the details of the first result.

use book_finder::catalog::OpenLibraryCatalog;
use book_finder::config::Config;
use book_finder::render::Renderer;
use book_finder::session::BookFinder;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    let catalog = Arc::new(OpenLibraryCatalog::from_config(&config.catalog)?);
    let renderer = Renderer::new(&config);
    let mut finder = BookFinder::new(catalog);

    finder.set_query("dune");
    finder.submit().await;

    if let Some(error) = finder.search().error() {
        eprintln!("{}", error);
        return Ok(());
    }
    println!("Found {} books on page 1", finder.search().books().len());

    if finder.search().can_load_more() {
        finder.load_more().await;
        println!("{} books after page {}", finder.search().books().len(), finder.search().page());
    }

    for card in renderer.cards(finder.search().books()).iter().take(3) {
        println!("\n{}. {}", card.index, card.title);
        println!("   Authors: {}", card.authors);
        println!("   First Published: {}", card.first_published);
        println!("   Cover: {}", card.cover_url);
    }

    finder.open(0).await;
    if let Some(view) = renderer.detail_view(finder.detail()) {
        println!("\n{}", view.title);
        if let Some(description) = view.description {
            println!("{}", description);
        }
        if let Some(subjects) = view.subjects {
            println!("Subjects: {}", subjects);
        }
    }

    Ok(())
}
