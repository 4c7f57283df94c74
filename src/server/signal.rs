// Signal handling module
//
// Supported signals:
// - SIGTERM: Shutdown
// - SIGINT:  Shutdown (Ctrl+C)

use std::future::Future;
use std::io;

/// Register interrupt handlers and return a future that resolves on the first one
///
/// Must be called from within a Tokio runtime. Registration happens eagerly
/// so a signal arriving before the future is polled is not lost.
#[cfg(unix)]
pub fn shutdown_signal() -> io::Result<impl Future<Output = ()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    Ok(async move {
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    })
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn shutdown_signal() -> io::Result<impl Future<Output = ()>> {
    Ok(async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    })
}
