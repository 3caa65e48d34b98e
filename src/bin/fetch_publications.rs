// Publications refresher binary entry point.
//
// Scrapes the Google Scholar profile and rewrites the publications
// document the site serves.
// Usage: cargo run --bin fetch_publications [output-path]

use anyhow::{Context, Result};
use scholar_site::scholar::{document_from, ScholarFetcher, DEFAULT_USER_ID};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scholar_site=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let user_id =
        std::env::var("SCHOLAR_USER_ID").unwrap_or_else(|_| DEFAULT_USER_ID.to_string());
    let max_pages: usize = std::env::var("SCHOLAR_MAX_PAGES")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3);
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "site/publications.json".to_string());

    tracing::info!("Fetching publications from Google Scholar (user {user_id})...");
    let fetcher = ScholarFetcher::new(&user_id)?;
    let publications = fetcher.fetch_publications(max_pages);

    if publications.is_empty() {
        tracing::warn!("no publications found, leaving {output} untouched");
        return Ok(());
    }

    let doc = document_from(publications);
    let json = serde_json::to_string_pretty(&doc)?;
    std::fs::write(&output, json).with_context(|| format!("failed to write {output}"))?;

    tracing::info!("Saved {} publications to {}", doc.publications.len(), output);
    for (idx, publication) in doc.publications.iter().take(5).enumerate() {
        tracing::info!(
            "  {}. {} ({}) - {} citations",
            idx + 1,
            publication.title,
            publication
                .year
                .as_ref()
                .map(|y| y.to_string())
                .unwrap_or_else(|| "n/a".to_string()),
            publication.citations.unwrap_or(0),
        );
    }

    Ok(())
}
