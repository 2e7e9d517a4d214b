//! HTTP server initialization and runtime setup.
//!
//! Opens the configured store, applies migrations, and runs Axum until a
//! shutdown signal arrives.

use crate::config::{Config, StorageBackend};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::infrastructure::persistence::{MemoryStore, PgClickRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (link_repository, click_repository) = open_store(&config).await?;

    let state = AppState::new(
        link_repository,
        click_repository,
        Arc::new(RandomCodeGenerator),
        config.base_url.clone(),
        config.behind_proxy,
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

type Store = (Arc<dyn LinkRepository>, Arc<dyn ClickRepository>);

async fn open_store(config: &Config) -> Result<Store> {
    match config.storage_backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; links are lost on restart");
            let store = Arc::new(MemoryStore::new());
            let links: Arc<dyn LinkRepository> = store.clone();
            let clicks: Arc<dyn ClickRepository> = store;
            Ok((links, clicks))
        }
        StorageBackend::Postgres => {
            let pool = Arc::new(connect_pool(config).await?);
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(pool.as_ref())
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Migrations applied");

            let links: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(pool.clone()));
            let clicks: Arc<dyn ClickRepository> = Arc::new(PgClickRepository::new(pool));
            Ok((links, clicks))
        }
    }
}

/// Opens a PostgreSQL pool using the pool settings from `config`.
///
/// # Errors
///
/// Returns an error if no database URL is configured or the connection fails.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is not configured")?;

    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
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
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
