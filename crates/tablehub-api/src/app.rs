//! Application builder: wires router, middleware, and state into an Axum
//! app, and runs the server.

use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tokio::task::JoinError;
use tower_http::trace::TraceLayer;

use tablehub_core::config::{AppConfig, CorsConfig};
use tablehub_core::error::AppError;
use tablehub_database::open_store;

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState, cors_config: &CorsConfig) -> Router {
    build_router(state)
        .layer(build_compression_layer())
        .layer(build_cors_layer(cors_config))
        .layer(TraceLayer::new_for_http())
}

/// Runs the TableHub server until a shutdown signal arrives.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting TableHub server...");

    // ── Step 1: Open the reservation store ───────────────────────
    let (store, db_pool) = open_store(&config.database).await?;

    // ── Step 2: Wire services ────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let cors = config.server.cors.clone();
    tracing::info!(
        table_count = config.booking.table_count,
        max_guests = config.booking.max_guests,
        "Booking policy loaded"
    );
    let app = build_app(AppState::new(config, store), &cors);

    // ── Step 3: Serve ────────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("TableHub server listening on {}", addr);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.changed().await;
            })
            .await
    });

    let outcome = tokio::select! {
        result = &mut server => server_outcome(result),
        _ = shutdown_signal() => {
            tracing::info!(grace_seconds = grace.as_secs(), "Shutdown signal received, draining connections");
            let _ = shutdown_tx.send(true);
            match tokio::time::timeout(grace, &mut server).await {
                Ok(result) => server_outcome(result),
                Err(_) => {
                    tracing::warn!("Graceful shutdown timed out, aborting open connections");
                    server.abort();
                    Ok(())
                }
            }
        }
    };

    // ── Step 4: Release resources ────────────────────────────────
    if let Some(pool) = db_pool {
        pool.close().await;
    }
    tracing::info!("TableHub server stopped");

    outcome
}

fn server_outcome(result: Result<std::io::Result<()>, JoinError>) -> Result<(), AppError> {
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(AppError::internal(format!("Server error: {e}"))),
        Err(e) => Err(AppError::internal(format!("Server task failed: {e}"))),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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
}
