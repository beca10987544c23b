use std::net::SocketAddr;

use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hls_ingest::config::settings::AppConfig;
use hls_ingest::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::new()?;
    info!(
        files = %config.files_dir.display(),
        output = %config.output_dir.display(),
        mode = ?config.pipeline_mode,
        "Starting server..."
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let state = AppState::new(config)?;
    let app = hls_ingest::app::create_app(state).await;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutting down");
}
