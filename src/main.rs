use nocache_serve::config::{Config, DEFAULT_CONFIG_PATH};
use nocache_serve::server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional first argument: config file path (extension may be omitted)
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let cfg = Config::load_from(&config_path)?;

    // Build the Tokio runtime, sizing the worker pool from config
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(server::run(cfg))?;
    Ok(())
}
