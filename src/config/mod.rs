// Configuration module entry point
// Loads layered configuration and resolves it into the server's runtime settings

mod serve;
mod state;
mod types;

use std::net::SocketAddr;

use crate::error::ServeError;

// Re-export public types
pub use serve::ServeConfig;
pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig};

/// Config file looked up when no path is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "nocache-serve";

impl Config {
    /// Load configuration from specified file path (extension optional)
    ///
    /// The file is optional; defaults reproduce a plain `0.0.0.0:5000` server.
    /// Environment variables prefixed with `SERVER` override both, e.g.
    /// `SERVER_SERVER__PORT=8080`.
    pub fn load_from(config_path: &str) -> Result<Self, ::config::ConfigError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name(config_path).required(false))
            .add_source(
                ::config::Environment::with_prefix("SERVER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "server")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("http.server_name", "nocache-serve")?
            .set_default("http.index_files", vec!["index.html", "index.htm"])?
            .set_default("http.directory_listing", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ServeError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|source| ServeError::Address { addr, source })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                root: None,
                workers: None,
            },
            logging: LoggingConfig::default(),
            performance: PerformanceConfig::default(),
            http: HttpConfig::default(),
        }
    }
}
