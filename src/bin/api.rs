use anyhow::Result;
use linkscribe::{
    api, app_state::AppState, config::Config, extractor::ExtractorRegistry, fetcher,
};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    }

    // Load configuration
    let config = Config::from_env()?;

    // One shared client for every extractor
    let client = fetcher::build_client(config.http())?;
    let registry = ExtractorRegistry::with_defaults(client);
    info!("Registered extractors: {:?}", registry.registered_types());

    let shutdown_token = CancellationToken::new();
    let state = AppState::new(registry).with_shutdown(shutdown_token.clone());
    warn!("No completion backend configured; /api/classify will return 503");

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(async move {
            if let Err(e) = signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Received shutdown signal, initiating graceful shutdown...");
            shutdown_token.cancel();
        })
        .await?;

    info!("Server stopped");
    Ok(())
}
