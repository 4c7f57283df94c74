// Application state module
// Shared, read-only state handed to every connection task

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use super::serve::ServeConfig;
use super::types::PerformanceConfig;
use crate::logger::Logger;

/// Application state
pub struct AppState {
    pub serve: ServeConfig,
    pub performance: PerformanceConfig,
    pub logger: Arc<Logger>,
    pub active_connections: AtomicUsize,
}

impl AppState {
    pub fn new(serve: ServeConfig, performance: PerformanceConfig, logger: Arc<Logger>) -> Self {
        Self {
            serve,
            performance,
            logger,
            active_connections: AtomicUsize::new(0),
        }
    }
}
