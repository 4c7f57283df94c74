//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - Server lifecycle logging (banner, startup details, shutdown)
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;
pub use writer::LogWriter;

use crate::config::{LoggingConfig, ServeConfig};
use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::str::FromStr;

/// Severity threshold for non-access messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" | "trace" => Ok(Self::Debug),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        f.write_str(name)
    }
}

/// Server logger, shared by every connection task
pub struct Logger {
    writer: LogWriter,
    level: LogLevel,
    access_log: bool,
    access_log_format: String,
}

impl Logger {
    /// Build a logger from configuration, opening log files if configured
    pub fn new(config: &LoggingConfig) -> io::Result<Self> {
        let level = config
            .level
            .parse()
            .map_err(|e: String| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let writer = LogWriter::new(
            config.access_log_file.as_deref(),
            config.error_log_file.as_deref(),
        )?;

        Ok(Self {
            writer,
            level,
            access_log: config.access_log,
            access_log_format: config.access_log_format.clone(),
        })
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.access_log
    }

    fn enabled(&self, level: LogLevel) -> bool {
        level <= self.level
    }

    /// Startup banner, always printed
    pub fn log_banner(&self, addr: &SocketAddr, serve: &ServeConfig) {
        self.writer
            .write_info(&format!("✓ Static file server running on http://{addr}"));
        self.writer
            .write_info(&format!("✓ Serving files from {}", serve.root.display()));
        self.writer
            .write_info("✓ Caching disabled: every response carries no-cache headers");
    }

    pub fn log_server_start(&self, config: &crate::config::Config) {
        if !self.enabled(LogLevel::Debug) {
            return;
        }
        self.writer.write_info("[CONFIG] Loaded configuration:");
        self.writer.write_info(&format!(
            "  - Listen: {}:{}",
            config.server.host, config.server.port
        ));
        match config.server.workers {
            Some(workers) => self
                .writer
                .write_info(&format!("  - Worker threads: {workers}")),
            None => self
                .writer
                .write_info("  - Worker threads: default (CPU cores)"),
        }
        self.writer.write_info(&format!("  - Log level: {}", self.level));
        if let Some(ref path) = config.logging.access_log_file {
            self.writer.write_info(&format!("  - Access log: {path}"));
        }
        if let Some(ref path) = config.logging.error_log_file {
            self.writer.write_info(&format!("  - Error log: {path}"));
        }
        self.writer.write_info(&format!(
            "  - Max connections: {:?}",
            config.performance.max_connections
        ));
    }

    /// Final line on orderly shutdown, always printed
    pub fn log_shutdown(&self) {
        self.writer.write_info("\n✓ Server stopped");
    }

    pub fn log_connection_accepted(&self, peer_addr: &SocketAddr) {
        if self.enabled(LogLevel::Debug) {
            self.writer
                .write_info(&format!("[Connection] Accepted from: {peer_addr}"));
        }
    }

    pub fn log_connection_error(&self, err: &impl fmt::Debug) {
        self.log_error(&format!("Failed to serve connection: {err:?}"));
    }

    pub fn log_error(&self, message: &str) {
        if self.enabled(LogLevel::Error) {
            self.writer.write_error(&format!("[ERROR] {message}"));
        }
    }

    pub fn log_warning(&self, message: &str) {
        if self.enabled(LogLevel::Warn) {
            self.writer.write_error(&format!("[WARN] {message}"));
        }
    }

    pub fn log_debug(&self, message: &str) {
        if self.enabled(LogLevel::Debug) {
            self.writer.write_info(&format!("[DEBUG] {message}"));
        }
    }

    /// Log formatted access log entry
    pub fn log_access(&self, entry: &AccessLogEntry) {
        if self.access_log {
            self.writer
                .write_access(&entry.format(&self.access_log_format));
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self {
            writer: LogWriter::default(),
            level: LogLevel::Info,
            access_log: true,
            access_log_format: "server".to_string(),
        }
    }
}
