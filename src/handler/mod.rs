//! Request handler module
//!
//! Maps request paths onto the root directory and produces file, redirect,
//! listing and error responses.

pub mod listing;
pub mod path;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
