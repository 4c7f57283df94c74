//! Error types for server startup
//!
//! Request-level failures never surface here; they become HTTP responses.

use std::io;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("invalid listen address '{addr}': {source}")]
    Address {
        addr: String,
        #[source]
        source: AddrParseError,
    },

    #[error("root directory '{}' is not usable: {source}", .path.display())]
    RootDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("failed to open log file: {0}")]
    LogFile(#[source] io::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}
