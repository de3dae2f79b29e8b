use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use cinematch_client::config::Config;
use cinematch_client::view::Region;
use cinematch_client::{HttpCatalogClient, Mode, SessionController};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    let query = std::env::args()
        .nth(1)
        .context("usage: cinematch <query>")?;

    let catalog = Arc::new(HttpCatalogClient::from_config(&config)?);
    let mut session = SessionController::new(
        catalog,
        Mode::Single,
        Duration::from_millis(config.debounce_ms),
    );

    if session.submit_search(&query) {
        if let Some(trigger) = session.try_trigger() {
            session.run_search(trigger).await;
        }
    }

    let view = session.view();
    match (&view.search_results, &view.error) {
        (Region::Visible(cards), _) => {
            for card in cards {
                println!(
                    "{} ({}) rated {}",
                    card.title,
                    card.year.as_deref().unwrap_or("Unknown"),
                    card.rating
                );
            }
        }
        (_, Region::Visible(message)) => eprintln!("error: {}", message),
        _ => println!("No results."),
    }

    Ok(())
}
