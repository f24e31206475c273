//! Waypoint HTTP server lifecycle management.
//!
//! [`start_server`] binds the listener eagerly, then runs `axum::serve`
//! on a background Tokio task. The returned [`RunningServer`] owns a
//! shutdown signal; [`RunningServer::shutdown`] stops accepting, gives
//! open connections [`SHUTDOWN_GRACE`] to finish, then aborts the serve
//! task and releases the socket. Dropping the handle without calling it
//! also triggers the graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::router::build_router;
use crate::state::AppState;

/// Offset added to the host's base port to obtain the listen port.
pub const PORT_OFFSET: u16 = 3;

/// How long open connections may keep the server alive after shutdown
/// is requested. A client that stalls mid-request is cut off after this.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Smallest accepted base port.
pub const MIN_BASE_PORT: i64 = 1;

/// Largest accepted base port.
pub const MAX_BASE_PORT: i64 = 65533;

/// Derive the listen port from the host's base port.
///
/// Returns `None` when `base` is outside
/// [`MIN_BASE_PORT`]..=[`MAX_BASE_PORT`] or when adding [`PORT_OFFSET`]
/// leaves the `u16` range.
pub fn listen_port_for(base: i64) -> Option<u16> {
    if !(MIN_BASE_PORT..=MAX_BASE_PORT).contains(&base) {
        return None;
    }
    u16::try_from(base).ok()?.checked_add(PORT_OFFSET)
}

/// Configuration for the waypoint server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// The TCP port to listen on.
    pub port: u16,
}

impl ServerConfig {
    /// Listen on all interfaces at `port`.
    pub fn all_interfaces(port: u16) -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port,
        }
    }
}

/// Handle to a server running on a background task.
#[derive(Debug)]
pub struct RunningServer {
    local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Result<(), ServerError>>>,
}

impl RunningServer {
    /// The address the listener is bound to.
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Whether [`shutdown`](Self::shutdown) has not run yet.
    pub const fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Stop accepting connections and wait for the serve task to end.
    ///
    /// Open connections get [`SHUTDOWN_GRACE`] to finish; after that the
    /// serve task is aborted, which drops the listener. Returns within
    /// roughly the grace period no matter what clients do. Calling this
    /// more than once is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Serve`] if the server had already failed,
    /// or [`ServerError::Shutdown`] if the serve task panicked.
    pub async fn shutdown(&mut self) -> Result<(), ServerError> {
        if let Some(tx) = self.shutdown_tx.take() {
            if tx.send(()).is_err() {
                debug!(addr = %self.local_addr, "Serve task already exited");
            }
        }

        let Some(mut task) = self.task.take() else {
            return Ok(());
        };

        if let Ok(joined) = tokio::time::timeout(SHUTDOWN_GRACE, &mut task).await {
            joined.map_err(|e| ServerError::Shutdown(format!("serve task join failed: {e}")))??;
        } else {
            warn!(
                addr = %self.local_addr,
                grace_ms = SHUTDOWN_GRACE.as_millis(),
                "Connections still open after grace period, aborting serve task"
            );
            task.abort();
            match task.await {
                Ok(result) => result?,
                Err(e) if e.is_cancelled() => {}
                Err(e) => {
                    return Err(ServerError::Shutdown(format!("serve task join failed: {e}")));
                }
            }
        }

        info!(addr = %self.local_addr, "Waypoint server stopped");
        Ok(())
    }
}

/// Bind the listener and start serving on a background task.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] if the address is invalid or the TCP
/// listener cannot bind.
pub async fn start_server(
    config: &ServerConfig,
    state: Arc<AppState>,
) -> Result<RunningServer, ServerError> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| ServerError::Bind(format!("invalid address: {e}")))?;

    let router = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;
    let local_addr = listener
        .local_addr()
        .map_err(|e| ServerError::Bind(format!("no local address for {addr}: {e}")))?;

    info!(%local_addr, "Waypoint server listening");

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let task = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                // A dropped sender counts as a shutdown request too.
                shutdown_rx.await.ok();
            })
            .await
            .map_err(|e| ServerError::Serve(format!("serve error: {e}")))
    });

    Ok(RunningServer {
        local_addr,
        shutdown_tx: Some(shutdown_tx),
        task: Some(task),
    })
}

/// Errors that can occur when starting, running or stopping the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to the network address.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),

    /// The serve task could not be joined.
    #[error("shutdown error: {0}")]
    Shutdown(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_is_offset_by_three() {
        assert_eq!(listen_port_for(1), Some(4));
        assert_eq!(listen_port_for(8080), Some(8083));
        assert_eq!(listen_port_for(65532), Some(65535));
    }

    #[test]
    fn out_of_range_base_ports_are_rejected() {
        assert_eq!(listen_port_for(0), None);
        assert_eq!(listen_port_for(-1), None);
        assert_eq!(listen_port_for(65534), None);
        assert_eq!(listen_port_for(70000), None);
    }

    #[test]
    fn top_of_range_overflows_u16() {
        assert_eq!(listen_port_for(MAX_BASE_PORT), None);
    }
}
