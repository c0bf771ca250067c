use std::sync::Arc;

use skyvitals::alerts::HttpQueuePublisher;
use skyvitals::config::AppConfig;
use skyvitals::ingest::ObjectStoreClient;
use skyvitals::report::ReportProcessor;
use skyvitals::web::{AppState, report_routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;

    eprintln!("🏥 SkyVitals v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Listen: http://0.0.0.0:{}", config.port);
    eprintln!("   Queue: {}", config.queue.url);
    match &config.store {
        Some(store) => eprintln!("   Store: {} (bucket: {})", store.base_url, store.bucket),
        None => eprintln!("   Store: disabled (direct upload only)"),
    }
    eprintln!("   Max document: {} chars\n", config.max_document_chars);

    let publisher = Arc::new(HttpQueuePublisher::new(config.queue.clone()));
    let processor = Arc::new(ReportProcessor::new(publisher, config.max_document_chars));
    let store = config.store.clone().map(|c| Arc::new(ObjectStoreClient::new(c)));

    let app = report_routes(AppState { processor, store });

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(port = config.port, "SkyVitals server started");
    axum::serve(listener, app).await?;

    Ok(())
}
