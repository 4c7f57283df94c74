// Server module entry point
// Binds the listener, prints the banner and runs the accept loop until interrupted

pub mod connection;
pub mod listener;
pub mod signal;

// Rust does not allow `loop` as a module name (keyword), so it is exposed as server_loop
#[path = "loop.rs"]
pub mod server_loop;

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::{AppState, Config, ServeConfig};
use crate::error::ServeError;
use crate::logger::Logger;

// Re-export commonly used items
pub use listener::create_listener;
pub use server_loop::run_until;

/// Bind the listening socket, mapping failures to a startup error
pub fn bind(addr: SocketAddr) -> Result<TcpListener, ServeError> {
    create_listener(addr).map_err(|source| ServeError::Bind { addr, source })
}

/// Run the server described by `config` until SIGINT or SIGTERM
pub async fn run(config: Config) -> Result<(), ServeError> {
    let logger = Arc::new(Logger::new(&config.logging).map_err(ServeError::LogFile)?);
    let serve = ServeConfig::from_config(&config)?;

    let listener = bind(serve.addr)?;
    let local_addr = listener.local_addr()?;

    logger.log_banner(&local_addr, &serve);
    logger.log_server_start(&config);

    let shutdown = signal::shutdown_signal()?;
    let state = Arc::new(AppState::new(serve, config.performance, logger));
    run_until(listener, state, shutdown).await;
    Ok(())
}
