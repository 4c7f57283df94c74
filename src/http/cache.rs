//! HTTP cache control module
//!
//! Attaches the no-cache headers to outgoing responses and evaluates
//! `If-Modified-Since` against file modification times.

use chrono::{DateTime, Utc};
use hyper::header::{HeaderName, HeaderValue};
use hyper::HeaderMap;
use std::time::SystemTime;

/// Headers appended to every response so clients and proxies never reuse a copy
pub const NO_CACHE_HEADERS: [(&str, &str); 3] = [
    ("cache-control", "no-cache, no-store, must-revalidate"),
    ("pragma", "no-cache"),
    ("expires", "0"),
];

/// Append the no-cache headers after whatever the inner handler wrote
pub fn apply_no_cache(headers: &mut HeaderMap) {
    for (name, value) in NO_CACHE_HEADERS {
        headers.append(HeaderName::from_static(name), HeaderValue::from_static(value));
    }
}

/// Format a timestamp as an HTTP date, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
pub fn format_http_date(time: SystemTime) -> String {
    let time: DateTime<Utc> = time.into();
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parse an HTTP date header value
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Check whether a file modified at `modified` is still fresh for the client
///
/// Comparison is at whole-second granularity since HTTP dates carry no
/// sub-second part. Unparseable header values never match.
///
/// # Returns
/// Returns true if the client's copy is current (should return 304)
pub fn not_modified_since(if_modified_since: Option<&str>, modified: SystemTime) -> bool {
    let Some(since) = if_modified_since.and_then(parse_http_date) else {
        return false;
    };
    let modified: DateTime<Utc> = modified.into();
    modified.timestamp() <= since.timestamp()
}
