use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use overview_core::GeminiBackend;
use overview_server::{AppState, ServerConfig, build_app};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,overview_server=debug,overview_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().context("Failed to load configuration")?;
    let criteria = config.load_criteria()?;
    tracing::info!(criteria = criteria.len(), "criteria loaded");

    let backend = GeminiBackend::new(config.gemini.clone()).context("Failed to build Gemini client")?;
    let state = AppState::new(Arc::new(backend), criteria, config.fetch.clone(), config.session_idle);

    let eviction = state.sessions.clone().spawn_eviction(Duration::from_secs(60));
    let app = build_app(state, config.request_timeout);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.addr))?;
    tracing::info!("Listening on http://{}", config.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    eviction.abort();
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
