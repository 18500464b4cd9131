//! Search the catalog, open the first hit and list its critic reviews.
//!
//! ```sh
//! GOOGLE_BOOKS_API_KEY=... NYTIMES_API_KEY=... cargo run --example search_session -- "dune"
//! ```

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use shelf_scout::config::get_config;
use shelf_scout::utils::{init_tracing, HttpClient};
use shelf_scout::{
    BookDetailsController, GoogleBooksSource, NyTimesSource, ReviewsController, SearchController,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = get_config();
    init_tracing(&config.logging).context("Failed to initialize logging")?;

    let query = std::env::args().nth(1).unwrap_or_else(|| "dune".to_string());

    let client = HttpClient::from_config(&config.http).context("Failed to build HTTP client")?;
    let catalog = Arc::new(GoogleBooksSource::from_config(&config, client.clone()));
    let reviews = Arc::new(NyTimesSource::from_config(&config, client));

    // Simulate typing the query one character at a time
    let search = SearchController::from_config(catalog.clone(), &config.search);
    let mut rx = search.subscribe();
    let mut typed = String::new();
    for c in query.chars() {
        typed.push(c);
        search.handle_query_change(&typed);
        tokio::time::sleep(Duration::from_millis(40)).await;
    }

    let state = tokio::time::timeout(Duration::from_secs(15), async {
        loop {
            {
                let state = rx.borrow_and_update();
                if state.query == query
                    && !state.is_loading
                    && (state.error.is_some() || !state.results.is_empty())
                {
                    return state.clone();
                }
            }
            if rx.changed().await.is_err() {
                return search.state();
            }
        }
    })
    .await
    .context("Search timed out")?;

    if let Some(error) = state.error {
        anyhow::bail!("Search for {:?} failed: {}", query, error);
    }

    println!("{} results for {:?}", state.results.len(), query);
    for (i, book) in state.results.iter().enumerate() {
        println!("{:>3}. {} - {}", i + 1, book.title, book.primary_author());
    }

    let Some(first) = state.results.first() else {
        return Ok(());
    };

    let details = BookDetailsController::new(catalog);
    details.load(&first.id).await;
    let details = details.state();
    if let Some(book) = details.book {
        println!();
        println!("{}", book.title);
        if let Some(stars) = book.star_rating() {
            println!(
                "Rating: {}{}{}",
                "*".repeat(stars.full as usize),
                if stars.half { "+" } else { "" },
                "-".repeat(stars.empty as usize)
            );
        }
        if let Some(text) = book.plain_description() {
            println!("{}", text);
        }
    } else if let Some(error) = details.error {
        println!("Details unavailable: {}", error);
    }

    let critic = ReviewsController::new(reviews);
    critic.load(Some(first.title.as_str())).await;
    let critic = critic.state();
    println!();
    match critic.error {
        Some(error) => println!("Reviews unavailable: {}", error),
        None if critic.reviews.is_empty() => println!("No reviews found"),
        None => {
            for review in &critic.reviews {
                println!("[{}] {} ({})", review.date, review.summary, review.author);
                println!("      {}", review.url);
            }
        }
    }

    Ok(())
}
