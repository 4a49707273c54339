//! Database initialization

use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::MySqlPool;
use std::time::Duration;
use tracing::{error, info};

use crate::{config::DatabaseConfig, Error, Result};

/// The process-wide connection handle
///
/// Built once at start-up and handed to every consumer. Clones share the
/// same underlying connections.
#[derive(Clone, Debug)]
pub struct Database {
    pool: MySqlPool,
}

impl Database {
    /// Open the handle and check that one connection can be established
    ///
    /// Any failure (unreachable host, bad credentials, unknown database) is
    /// reported as [`Error::Connection`]; nothing is retried.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        info!("Connecting to database: {}", config.dsn());

        let pool = pool_options(config)
            .connect_with(connect_options(config))
            .await
            .map_err(|e| {
                error!("Failed to connect to database: {}", e);
                Error::Connection(e.to_string())
            })?;

        info!("Database connected successfully");

        Ok(Self { pool })
    }

    /// Build the handle without touching the network; the first query connects
    #[must_use]
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        Self {
            pool: pool_options(config).connect_lazy_with(connect_options(config)),
        }
    }

    #[must_use]
    pub const fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// The shared handle
    #[must_use]
    pub const fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Close all connections; later queries fail with a closed-pool error
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn pool_options(config: &DatabaseConfig) -> MySqlPoolOptions {
    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
}

/// Statements always go through the server-side prepared protocol and rows
/// are decoded by column name, so only addressing and encoding are set here.
fn connect_options(config: &DatabaseConfig) -> MySqlConnectOptions {
    let options = MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.name)
        .username(&config.user)
        .charset(&config.charset);

    // An empty password means "no password", not an empty scramble
    if config.password.is_empty() {
        options
    } else {
        options.password(&config.password)
    }
}
