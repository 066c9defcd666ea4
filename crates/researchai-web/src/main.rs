//! Research AI web server
//!
//! Run with: cargo run -p researchai-web

use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use researchai_web::config::Config;
use researchai_web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Research AI web server...");

    let config = Config::load()?;
    let addr = config.server.socket_addr()?;
    info!(
        reply_policy = ?config.assistant.reply_policy,
        reply_delay_ms = config.assistant.reply_delay_ms,
        "Assistant configured"
    );

    // Every background reply and search timer hangs off this token
    let shutdown = CancellationToken::new();
    let state = AppState::new(config, shutdown.clone())?;
    let app = researchai_web::router::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutting down, cancelling pending work");
            shutdown.cancel();
        })
        .await?;

    Ok(())
}
