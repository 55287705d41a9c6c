mod api_doc;
mod config;
mod error;
mod handlers;
mod models;
mod pagination;
mod routes;
mod state;
mod store;

use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use config::{Config, StoreConfig};
use state::AppState;
use store::{MemoryNoteStore, NoteStore, SpannerNoteStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("notes-api starting");

    let config = Config::from_env()?;
    config.log_startup();

    match &config.store {
        StoreConfig::Memory => serve(&config, Arc::new(MemoryNoteStore::new())).await?,
        StoreConfig::Spanner(spanner) => {
            let store = SpannerNoteStore::from_config(spanner).await?;
            let served = serve(&config, Arc::new(store.clone())).await;
            store.close().await;
            served?;
        }
    }

    tracing::info!("notes-api stopped");
    Ok(())
}

/// Serve the API until a shutdown signal arrives.
///
/// The router (and with it every handle to `store`) is dropped before this returns.
async fn serve(config: &Config, store: Arc<dyn NoteStore>) -> anyhow::Result<()> {
    let app = routes::create_router(AppState { store });

    let addr = format!("{}:{}", config.service_host, config.service_port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("Swagger UI available at http://{}{}", addr, routes::SWAGGER_UI);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
