mod config;
mod error;
mod handler;
mod model;
mod route;
mod schema;
mod store;
mod view;

use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use crate::{config::Config, route::create_router, store::Store, view::Templates};

// Struct representing the application state
pub struct AppState {
    store: Store,
    templates: Templates,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::warn!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::warn!("Received SIGTERM, shutting down"),
    }
}

// Entry point of the application
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();

    let store = Store::open(&config.database_url, config.max_connections)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;
    store
        .create_schema()
        .await
        .context("failed to create database schema")?;
    tracing::info!(db_url = %config.database_url, "database ready");

    let templates = Templates::new().context("failed to compile templates")?;

    let app_state = Arc::new(AppState {
        store: store.clone(),
        templates,
    });
    let app = create_router(app_state);

    tracing::info!("Server listening on {}", config.bind_addr);

    axum::Server::try_bind(&config.bind_addr)
        .with_context(|| format!("failed to bind {}", config.bind_addr))?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("Server stopped");
    Ok(())
}
