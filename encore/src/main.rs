use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use encore::api::{create_router, AppState};
use encore::config::Config;
use encore::embeddings::EmbeddingProvider;
use encore::ingest::{EventFetcher, FixedDelay, IngestionPipeline};
use encore::llm::{LlmProvider, TextCompletion};
use encore::services::maintenance;
use encore::ticketing::TicketingClient;
use encore::vector_store::VectorStoreClient;

#[derive(Parser)]
#[command(name = "encore")]
#[command(about = "Retrieval-augmented search over NYC music events")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the search API server (default)
    Serve,
    /// Fetch upstream event listings, embed them, and store them in the
    /// vector index
    Ingest,
    /// Delete every vector in the configured namespace
    Purge,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "encore=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Ingest => ingest(config).await,
        Command::Purge => purge(config).await,
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    tracing::info!("Loading embedding model: {}...", config.embeddings.model);
    let embeddings = Arc::new(EmbeddingProvider::new(&config.embeddings)?);

    let index = Arc::new(VectorStoreClient::new(&config.vector_store)?);

    if let Some(llm_config) = &config.llm {
        tracing::info!("Initializing LLM provider: {}...", llm_config.model);
    }
    let llm = Arc::new(LlmProvider::new(config.llm.as_ref()));
    if !llm.is_available() {
        tracing::warn!("LLM unavailable - set LLM_MODEL to enable search summaries");
    }

    let state = AppState::new(config.clone(), embeddings, index, llm);
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Encore starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/health", addr);
    tracing::info!("  API docs:     http://{}/api/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/api/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn ingest(config: Config) -> anyhow::Result<()> {
    if config.ticketing.api_key.is_empty() {
        tracing::warn!("TICKETMASTER_API_KEY is not set - upstream requests will be rejected");
    }

    tracing::info!("Loading embedding model: {}...", config.embeddings.model);
    let embeddings = Arc::new(EmbeddingProvider::new(&config.embeddings)?);
    let index = Arc::new(VectorStoreClient::new(&config.vector_store)?);

    let client = TicketingClient::new(&config.ticketing)?;
    let rate = Arc::new(FixedDelay::from_config(&config.ticketing));
    let fetcher = EventFetcher::new(client, config.ticketing.clone(), rate);

    tracing::info!(
        "Fetching events from {} to {}...",
        config.ticketing.start_date,
        config.ticketing.end_date
    );
    let events = fetcher.fetch_all().await;
    tracing::info!("Total unique events fetched: {}", events.len());

    let pipeline = IngestionPipeline::new(embeddings, index, config.vector_store.upsert_batch_size);
    let report = pipeline.run(events).await;
    tracing::info!(
        "Ingestion finished: {} stored, {} skipped of {} fetched",
        report.stored,
        report.skipped,
        report.fetched
    );

    Ok(())
}

async fn purge(config: Config) -> anyhow::Result<()> {
    let index = VectorStoreClient::new(&config.vector_store)?;
    let deleted = maintenance::purge(&index).await?;
    tracing::info!("Purge complete ({} vectors removed)", deleted);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
