//! HTTP server initialization and runtime setup.
//!
//! Handles the store lifecycle (open, migrate, close) and the Axum server
//! with graceful shutdown.

use crate::config::Config;
use crate::domain::repositories::ShortUrlRepository;
use crate::infrastructure::persistence::{InMemoryShortUrlRepository, PgShortUrlRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result, bail};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// An opened record store and the resources behind it.
pub struct Store {
    repository: Arc<dyn ShortUrlRepository>,
    pool: Option<PgPool>,
}

impl Store {
    /// Store kept in process memory; nothing survives a restart.
    pub fn in_memory() -> Self {
        Self {
            repository: Arc::new(InMemoryShortUrlRepository::new()),
            pool: None,
        }
    }

    /// Store backed by a PostgreSQL pool, with a per-query timeout.
    pub fn postgres(pool: PgPool, query_timeout: Duration) -> Self {
        let repository = PgShortUrlRepository::with_timeout(Arc::new(pool.clone()), query_timeout);

        Self {
            repository: Arc::new(repository),
            pool: Some(pool),
        }
    }

    /// Shared repository handle for services.
    pub fn repository(&self) -> Arc<dyn ShortUrlRepository> {
        self.repository.clone()
    }

    /// Applies pending migrations and returns how many were applied.
    ///
    /// # Errors
    ///
    /// Fails for the in-memory store, which has no schema, and when a
    /// migration cannot be applied.
    pub async fn migrate(&self) -> Result<usize> {
        let Some(pool) = &self.pool else {
            bail!("The in-memory store has no migrations");
        };

        let before = applied_migrations(pool).await?;
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .context("Failed to run migrations")?;
        let after = applied_migrations(pool).await?;

        Ok(usize::try_from(after - before).unwrap_or_default())
    }

    /// Closes the connection pool, waiting for checked-out connections.
    pub async fn close(self) {
        if let Some(pool) = self.pool {
            pool.close().await;
            tracing::info!("Database pool closed");
        }
    }
}

async fn applied_migrations(pool: &PgPool) -> Result<i64> {
    let (exists,): (bool,) =
        sqlx::query_as("SELECT to_regclass('_sqlx_migrations') IS NOT NULL")
            .fetch_one(pool)
            .await
            .context("Failed to inspect migrations table")?;

    if !exists {
        return Ok(0);
    }

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM _sqlx_migrations WHERE success")
        .fetch_one(pool)
        .await
        .context("Failed to count applied migrations")?;

    Ok(count)
}

/// Connects the store selected by `config.database_url` without touching
/// the schema.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn connect_store(config: &Config) -> Result<Store> {
    if config.is_in_memory() {
        tracing::warn!("Using in-memory store; records are lost on restart");
        return Ok(Store::in_memory());
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    Ok(Store::postgres(pool, config.storage_timeout()))
}

/// Opens the store selected by `config.database_url`.
///
/// For PostgreSQL this connects the pool and applies pending migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn open_store(config: &Config) -> Result<Store> {
    let store = connect_store(config).await?;

    if !config.is_in_memory() {
        let applied = store.migrate().await?;
        tracing::info!(applied, "Migrations applied");
    }

    Ok(store)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The record store (PostgreSQL pool + migrations, or in-memory)
/// - Application services
/// - Axum HTTP server, stopped by SIGINT / SIGTERM
///
/// The store is closed after in-flight requests finish.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = open_store(&config).await?;

    let state = AppState::new(
        store.repository(),
        config.code_max_attempts,
        config.base_url.clone(),
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

    let served = axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    store.close().await;
    served?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves when the process receives Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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
