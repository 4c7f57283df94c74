//! HTTP response building module
//!
//! Provides builders for the responses the static handler produces. Builders
//! return `hyper::http::Result` so the caller can log a failure and fall back
//! to [`fallback_response`].

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE, LAST_MODIFIED, LOCATION};
use hyper::{Response, StatusCode};

type HttpResult = hyper::http::Result<Response<Full<Bytes>>>;

const ERROR_CONTENT_TYPE: &str = "text/html;charset=utf-8";

/// Escape text for inclusion in HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Body used when a response could not be built
pub fn fallback_response() -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
}

fn body_unless_head(data: Bytes, is_head: bool) -> Full<Bytes> {
    if is_head {
        Full::new(Bytes::new())
    } else {
        Full::new(data)
    }
}

/// Build an HTML error page
///
/// The page names the status code, the handler's message and the standard
/// reason phrase for the code.
pub fn build_error_response(status: StatusCode, message: &str, is_head: bool) -> HttpResult {
    let reason = status.canonical_reason().unwrap_or("Unknown");
    let page = format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n<meta charset=\"utf-8\">\n<title>{code} {reason}</title>\n</head>\n\
         <body>\n<h1>{code} {reason}</h1>\n<p>{message}.</p>\n</body>\n\
         </html>\n",
        code = status.as_u16(),
        message = escape_html(message),
    );

    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, ERROR_CONTENT_TYPE)
        .header(CONTENT_LENGTH, page.len())
        .body(body_unless_head(Bytes::from(page), is_head))
}

/// Build 404 Not Found response
pub fn build_404_response(message: &str, is_head: bool) -> HttpResult {
    build_error_response(StatusCode::NOT_FOUND, message, is_head)
}

/// Build 501 Not Implemented response for methods the static handler does not serve
pub fn build_501_response(method: &str, is_head: bool) -> HttpResult {
    build_error_response(
        StatusCode::NOT_IMPLEMENTED,
        &format!("Unsupported method ('{method}')"),
        is_head,
    )
}

/// Build 301 redirect response, used to add the trailing slash to directory paths
pub fn build_redirect_response(location: &str) -> HttpResult {
    Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header(LOCATION, location)
        .header(CONTENT_LENGTH, 0)
        .body(Full::new(Bytes::new()))
}

/// Build 304 Not Modified response
pub fn build_304_response(last_modified: &str) -> HttpResult {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header(LAST_MODIFIED, last_modified)
        .body(Full::new(Bytes::new()))
}

/// Build generic HTML response
pub fn build_html_response(content: String, is_head: bool) -> HttpResult {
    let content_length = content.len();

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/html; charset=utf-8")
        .header(CONTENT_LENGTH, content_length)
        .body(body_unless_head(Bytes::from(content), is_head))
}

/// Build 200 response carrying file content
pub fn build_file_response(
    data: Bytes,
    content_type: &str,
    last_modified: Option<&str>,
    is_head: bool,
) -> HttpResult {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, data.len());

    if let Some(last_modified) = last_modified {
        builder = builder.header(LAST_MODIFIED, last_modified);
    }

    builder.body(body_unless_head(data, is_head))
}
