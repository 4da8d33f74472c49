//! HTTP transport for the founder dashboard using Axum
//!
//! Plain REST + JSON: each endpoint returns the corresponding engine output
//! type verbatim. Authentication and role gating are the surrounding
//! application's concern.

pub mod error;
pub mod handler;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::datastore::DatastoreClient;
use crate::report::ReportGenerator;
use handler::{get_blockers, get_confidence, get_funnel, get_report, health, post_simulate, AppState};

/// Start HTTP server with the founder dashboard endpoints
///
/// # Arguments
/// * `port` - Port to listen on (default: 3000)
/// * `datastore` - Hosted datastore RPC client
/// * `report_generator` - Briefing generator with its TTL cache
///
/// # Endpoints
/// - GET  /health
/// - GET  /founder/confidence
/// - GET  /founder/funnel?period=&track=
/// - GET  /founder/blockers?period=&track=
/// - POST /founder/strategy/simulate
/// - GET  /founder/report?period=&track=&sections=
///
/// # CORS
/// Configured to allow all origins (*) for development.
/// In production, should be restricted to the dashboard origin.
pub async fn start_http_server(
    port: u16,
    datastore: Arc<DatastoreClient>,
    report_generator: Arc<ReportGenerator>,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Initializing founder insights HTTP server...");

    // Build application state
    let state = AppState {
        datastore,
        report_generator,
    };

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .route("/founder/confidence", get(get_confidence))
        .route("/founder/funnel", get(get_funnel))
        .route("/founder/blockers", get(get_blockers))
        .route("/founder/strategy/simulate", post(post_simulate))
        .route("/founder/report", get(get_report))
        .layer(cors)
        .with_state(state);

    // Bind to address
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    tracing::info!("HTTP server listening on {}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  http://{}/health", addr);
    tracing::info!("  GET  http://{}/founder/confidence", addr);
    tracing::info!("  GET  http://{}/founder/funnel?period=30d&track=all", addr);
    tracing::info!("  GET  http://{}/founder/blockers", addr);
    tracing::info!("  POST http://{}/founder/strategy/simulate", addr);
    tracing::info!("  GET  http://{}/founder/report", addr);

    // Start server with graceful shutdown
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    // Spawn shutdown signal handler
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Received shutdown signal (Ctrl+C)");
                let _ = shutdown_tx.send(());
            }
            Err(err) => {
                tracing::error!("Failed to listen for shutdown signal: {}", err);
            }
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_rx.await.ok();
            tracing::info!("Shutting down HTTP server...");
        })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
