pub mod api;
pub mod catalog;
pub mod grid;
pub mod models;
pub mod query;
pub mod services;
pub mod telemetry;

use common::Result;
use services::StagingService;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Serves the staging API on `port`. The hosting binary wires the concrete
/// metadata-catalog and grid collaborators into the service before calling
/// this.
pub async fn serve(service: Arc<StagingService>, port: u16) -> Result<()> {
    let router = api::routes(service);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "gridstage API listening");
    axum::serve(listener, router).await?;

    Ok(())
}
