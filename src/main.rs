use anyhow::Context;
use healthplan::app::{bootstrap, build_router, load_config};
use healthplan::lifecycle::shutdown_signal;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("🚀 Starting health plan service...");

    let config = load_config().context("Invalid configuration")?;
    let addr = config.bind_address();
    tracing::info!(
        error_policy = %config.error_policy,
        public_url = %config.public_url,
        "Configuration loaded"
    );

    let container = bootstrap(config).context("Failed to register modules")?;
    let router = build_router(Arc::new(container)).context("Failed to build router")?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("✅ Server running on {addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("👋 Server stopped");
    Ok(())
}
