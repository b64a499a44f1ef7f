//! TCP listener and graceful shutdown.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use super::router::router;
use crate::error::Result;
use crate::infrastructure::config::server::ServerConfig;
use crate::port::inbound::race::RaceTracker;

/// Bind the configured address and serve until `shutdown` resolves.
///
/// # Errors
/// Returns an error if the address is invalid or cannot be bound.
pub async fn serve<F>(config: &ServerConfig, tracker: Arc<dyn RaceTracker>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr: SocketAddr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, store = tracker.store_name(), "HTTP API listening");
    axum::serve(listener, router(tracker))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("HTTP API stopped");
    Ok(())
}
