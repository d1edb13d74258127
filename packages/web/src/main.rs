use std::sync::Arc;

use flashcards_generator::HuggingFaceClient;
use flashcards_web::{app, AppState, WebConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match WebConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let client = match HuggingFaceClient::new(&config.generator) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "failed to create inference client");
            std::process::exit(1);
        }
    };

    let state = AppState {
        client: Arc::new(client),
        generator: Arc::new(config.generator),
    };

    let addr = config.bind_addr;
    tracing::info!("listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to bind on {addr}");
            std::process::exit(1);
        });

    if let Err(e) = axum::serve(listener, app(state)).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
