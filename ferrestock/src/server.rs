//! Server lifecycle management
//!
//! Builds the database handle, runs first-start seeding and serves HTTP
//! until a shutdown signal arrives.

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use ferrestock_core::{
    bootstrap::{ensure_default_admin, ensure_default_categories, AdminSeed},
    repository::AccountRepository,
    Config, Database,
};

use crate::http::{create_degraded_router, create_router, AppError, AppState};

/// Run the server until Ctrl+C / SIGTERM
pub async fn run(config: &Config) -> Result<()> {
    let (router, db) = build_router(config).await;

    serve(config, router).await?;

    if let Some(db) = db {
        db.close().await;
        info!("Database connections closed");
    }

    Ok(())
}

/// Connect and seed, then pick the router to serve
///
/// A failed connection does not stop the process: the degraded router is
/// returned instead, so clients get a 500 rather than a refused socket.
async fn build_router(config: &Config) -> (Router, Option<Database>) {
    match Database::connect(&config.database).await {
        Ok(db) => {
            bootstrap(&db, config).await;
            (create_router(AppState::new(db.clone())), Some(db))
        }
        Err(e) => {
            let fallback = AppError::from(e);
            warn!("Serving degraded router; every request will answer 500");
            (create_degraded_router(fallback), None)
        }
    }
}

/// Seeding failures are logged and startup continues
async fn bootstrap(db: &Database, config: &Config) {
    info!("Checking admin account bootstrap...");
    let accounts = AccountRepository::new(db.pool().clone());
    match ensure_default_admin(&accounts, &config.bootstrap).await {
        Ok(AdminSeed::Created { id }) => info!(id, "Admin account bootstrapped"),
        Ok(AdminSeed::Skipped { .. } | AdminSeed::Disabled) => {}
        Err(e) => {
            error!("Failed to bootstrap admin account: {}", e);
            error!("You may need to create an administrator manually");
        }
    }

    if config.bootstrap.seed_categories {
        if let Err(e) = ensure_default_categories(db).await {
            error!("Failed to seed default categories: {}", e);
        }
    }
}

async fn serve(config: &Config, router: Router) -> Result<()> {
    let http_addr = config.http_address();
    let listener = TcpListener::bind(&http_addr).await.map_err(|e| {
        error!("Failed to bind HTTP address {}: {}", http_addr, e);
        anyhow::anyhow!("Failed to bind {http_addr}: {e}")
    })?;

    info!("HTTP server listening on {}", http_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server shut down gracefully");
    Ok(())
}

/// Wait for a shutdown signal (SIGTERM or SIGINT/Ctrl+C)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("Received Ctrl+C"); }
        () = terminate => { info!("Received SIGTERM"); }
    }
}
