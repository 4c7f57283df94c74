//! Request dispatch module
//!
//! Entry point for HTTP request processing. The static handler produces the
//! response; this layer then appends the no-cache headers and writes the
//! access log line.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger::AccessLogEntry;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, IF_MODIFIED_SINCE, IF_NONE_MATCH, REFERER, SERVER, USER_AGENT};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Raw (still percent-encoded) request path
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_modified_since: Option<String>,
    pub has_if_none_match: bool,
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    // Only GET and HEAD are served, so the body is never read
    let (parts, _) = req.into_parts();
    let mut response = dispatch(&parts, &state).await;

    http::apply_no_cache(response.headers_mut());
    if let Ok(server) = HeaderValue::from_str(&state.serve.server_name) {
        response.headers_mut().insert(SERVER, server);
    }

    if state.logger.access_log_enabled() {
        let entry = access_entry(&parts, &response, peer_addr, started);
        state.logger.log_access(&entry);
    }

    Ok(response)
}

/// Produce the inner handler's response, before headers are appended
async fn dispatch(req: &Parts, state: &AppState) -> Response<Full<Bytes>> {
    let method = &req.method;
    let is_head = *method == Method::HEAD;

    let result = if *method == Method::GET || is_head {
        let ctx = RequestContext {
            path: req.uri.path(),
            query: req.uri.query(),
            is_head,
            if_modified_since: header_string(req, IF_MODIFIED_SINCE.as_str()),
            has_if_none_match: req.headers.contains_key(IF_NONE_MATCH),
        };
        static_files::serve_path(&ctx, &state.serve, &state.logger).await
    } else {
        state
            .logger
            .log_warning(&format!("Unsupported method: {method}"));
        http::build_501_response(method.as_str(), false)
    };

    result.unwrap_or_else(|e| {
        state
            .logger
            .log_error(&format!("Failed to build response: {e}"));
        http::fallback_response()
    })
}

fn header_string(req: &Parts, name: &str) -> Option<String> {
    req.headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Describe a finished request for the access log
fn access_entry(
    req: &Parts,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method.to_string(),
        req.uri.path().to_string(),
    );
    entry.query = req.uri.query().map(ToString::to_string);
    entry.http_version = version_label(req.version).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);
    entry.referer = header_string(req, REFERER.as_str());
    entry.user_agent = header_string(req, USER_AGENT.as_str());
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
