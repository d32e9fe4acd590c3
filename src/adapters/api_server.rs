use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use crate::api::{create_router, AppState};
use crate::config::ServerConfig;
use crate::error::{HoopcastError, Result};

/// Start the API server and run until Ctrl+C / SIGTERM
pub async fn start_api_server(state: AppState, config: &ServerConfig) -> Result<()> {
    let app = create_router(state, config.cors_permissive);

    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .map_err(|e| {
            HoopcastError::InvalidConfig(format!(
                "cannot bind {}:{}: {}",
                config.host, config.port, e
            ))
        })?;
    let addr = listener.local_addr()?;
    info!("API server listening on http://{}", addr);
    info!("  POST /api/predict");
    info!("  POST /api/explain");
    info!("  GET  /api/teams, /api/teams/:id, /api/teams/:id/games");
    info!("  GET  /api/health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
