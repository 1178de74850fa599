//! Read-only REST API over a finished pipeline run.
//!
//! GET endpoints:
//! - `/topology`: registered nodes and their supports sets
//! - `/report`: network power report
//! - `/utilization/{tier}` and `/power/{tier}`: per-tier tables
//! - `/total-power`: network summary rows
//!
//! Table endpoints accept optional `from`/`to` timestamps (inclusive).

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::pipeline::{NetworkReport, PipelineOutput};
use crate::topology::{NetworkNode, TopologyModel};

/// Immutable application state shared across all request handlers.
///
/// Built once after the run completes and wrapped in `Arc`; no locks are
/// needed since all data is read-only.
pub struct AppState {
    /// Registered nodes in registration order.
    pub nodes: Vec<NetworkNode>,
    /// Every table produced by the run.
    pub output: PipelineOutput,
    /// Summary figures of the run.
    pub report: NetworkReport,
}

impl AppState {
    pub fn new(topology: &TopologyModel, output: PipelineOutput) -> Self {
        let report = NetworkReport::from_rows(&output.network);
        Self {
            nodes: topology.nodes().to_vec(),
            output,
            report,
        }
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/topology", get(handlers::get_topology))
        .route("/report", get(handlers::get_report))
        .route("/utilization/{tier}", get(handlers::get_utilization))
        .route("/power/{tier}", get(handlers::get_power))
        .route("/total-power", get(handlers::get_total_power))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an I/O error if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
