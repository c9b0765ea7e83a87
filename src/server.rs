//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, database migrations, service wiring, and the Axum
//! server lifecycle.

use crate::application::services::{LinkService, ShortenerSettings};
use crate::config::Config;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::persistence::{MemoryLinkRepository, PgLinkRepository};
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

/// Opens a PostgreSQL pool using the configured pool settings.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_pool(config: &Config, database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Some(Duration::from_secs(config.db_idle_timeout)))
        .max_lifetime(Some(Duration::from_secs(config.db_max_lifetime)))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

/// Applies the embedded schema migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to migrate")?;

    Ok(())
}

/// Builds the link service from configuration and a link store.
///
/// # Errors
///
/// Returns an error if the code alphabet or length is unusable.
pub fn build_link_service(
    config: &Config,
    link_repository: Arc<dyn LinkRepository>,
) -> Result<LinkService> {
    let code_source = RandomCodeGenerator::new(&config.code_alphabet, config.code_length)
        .context("Failed to initialize code generator")?;

    let settings = ShortenerSettings {
        base_url: config.base_url.clone(),
        max_url_length: config.max_url_length,
        max_attempts: config.max_issue_attempts,
    };

    Ok(LinkService::new(
        link_repository,
        Arc::new(code_source),
        settings,
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations (or the in-memory store)
/// - Link service with a CSPRNG code generator
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (link_repository, store_backend): (Arc<dyn LinkRepository>, &'static str) =
        match config.database_url {
            Some(ref database_url) => {
                let pool = connect_pool(&config, database_url).await?;
                tracing::info!("Connected to database");

                run_migrations(&pool).await?;

                let repository: Arc<dyn LinkRepository> =
                    Arc::new(PgLinkRepository::new(Arc::new(pool)));
                (repository, "postgres")
            }
            None => {
                tracing::warn!("No database configured, links are kept in memory only");
                let repository: Arc<dyn LinkRepository> = Arc::new(MemoryLinkRepository::new());
                (repository, "memory")
            }
        };

    let link_service = build_link_service(&config, link_repository)?;
    let state = AppState::new(Arc::new(link_service), store_backend);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown signal received");
}
