//! Static file server that disables client and proxy caching.
//!
//! Files under a root directory are served over HTTP/1.x. Every response
//! carries `Cache-Control: no-cache, no-store, must-revalidate`,
//! `Pragma: no-cache` and `Expires: 0`, and every request is written to the
//! access log.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use error::ServeError;
