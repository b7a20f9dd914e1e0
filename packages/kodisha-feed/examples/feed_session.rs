//! Walks one feed session against a live backend: initial load, scroll
//! pagination, a search, and selector filtering.
//!
//! ```bash
//! KODISHA_API_URL=https://api.example.com KODISHA_API_TOKEN=... \
//!     cargo run --example feed_session
//! ```

use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use kodisha_api::PropertyApiClient;
use kodisha_feed::{BasePropertyApi, FeedController, FilterCriteria, PriceRange, SearchLogger};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,kodisha_feed=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_url = env::var("KODISHA_API_URL")?;
    let token = env::var("KODISHA_API_TOKEN")?;
    let api: Arc<dyn BasePropertyApi> = Arc::new(PropertyApiClient::new(base_url, token)?);

    let feed = FeedController::new(api.clone());
    let logger = SearchLogger::spawn(api);

    println!("=== Initial load ===");
    let outcome = feed.load_initial(None).await?;
    println!("loaded {} listings", outcome.net_new());
    for listing in feed.listings().iter().take(5) {
        println!(
            "  {} | {} TZS | {}",
            listing.title,
            listing.price.digits(),
            listing.location
        );
    }

    println!("\n=== Scroll pagination ===");
    feed.on_scroll_momentum_begin();
    let outcome = feed.load_more(None).await?;
    println!(
        "appended {} new listings, {} total",
        outcome.net_new(),
        feed.listings().len()
    );

    println!("\n=== Search: \"bedsitter sinza\" ===");
    logger.submit_query("bedsitter sinza");
    let criteria = FilterCriteria::default().with_query("bedsitter sinza");
    let visible = feed.visible_listings(&criteria);
    println!("{} of {} listings match", visible.len(), feed.listings().len());

    println!("\n=== Price band 50,000 - 100,000 ===");
    let criteria = FilterCriteria::default().with_price_range(PriceRange::new(
        "50,000 - 100,000",
        50_000.0,
        100_000.0,
    ));
    println!("{} listings in band", feed.visible_listings(&criteria).len());

    // Let the debounced search record flush before winding down.
    tokio::time::sleep(Duration::from_millis(1500)).await;
    logger.shutdown().await;

    Ok(())
}
