//! Demonstrates tracing integration with AsyncTry
//!
//! Run with: cargo run --example tracing_demo --features tracing

use std::time::Duration;

use tryable::{AsyncTry, HttpError};

#[tokio::main]
async fn main() {
    // Set up tracing subscriber
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    tracing::info!("Starting tracing demo");

    let greeting = fetch_name()
        .map(|name| format!("Hello World from {}!", name))
        .map(|message| message.to_uppercase())
        .instrument(tracing::info_span!("greeting"));

    match greeting.get().await {
        Ok(message) => tracing::info!("Chain completed: {}", message),
        Err(e) => tracing::error!("Chain failed: {}", e),
    }

    // A second query reads the memoized outcome and emits no resolution events
    tracing::info!("Querying again: success = {}", greeting.is_success().await);

    let missing = AsyncTry::<String, _>::failure(HttpError::not_found());
    let skipped = missing.map(|name| name.len());
    tracing::info!("Skipped chain cause: {:?}", skipped.get_cause().await);
}

fn fetch_name() -> AsyncTry<String, HttpError> {
    AsyncTry::of(|| async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        Ok("John Doe".to_string())
    })
}
