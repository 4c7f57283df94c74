//! Static file serving module
//!
//! Resolves a request against the root directory and builds the file,
//! index, listing, redirect or error response for it.

use crate::config::ServeConfig;
use crate::handler::router::RequestContext;
use crate::handler::{listing, path};
use crate::http::{self, cache, mime};
use crate::logger::Logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use percent_encoding::percent_decode_str;
use std::path::Path;
use tokio::fs;

type HttpResult = hyper::http::Result<Response<Full<Bytes>>>;

const FILE_NOT_FOUND: &str = "File not found";
const NO_LISTING: &str = "No permission to list directory";

/// Serve the filesystem entry a request path points at
pub async fn serve_path(ctx: &RequestContext<'_>, serve: &ServeConfig, logger: &Logger) -> HttpResult {
    let target = path::translate_path(&serve.root, ctx.path);

    let Ok(metadata) = fs::metadata(&target).await else {
        // File not found is common (404), no need to log at warning level
        logger.log_debug(&format!("Not found: {} -> {}", ctx.path, target.display()));
        return http::build_404_response(FILE_NOT_FOUND, ctx.is_head);
    };

    if !path::is_within_root(&serve.root, &target).await {
        logger.log_warning(&format!(
            "Path outside root blocked: {} -> {}",
            ctx.path,
            target.display()
        ));
        return http::build_404_response(FILE_NOT_FOUND, ctx.is_head);
    }

    if metadata.is_dir() {
        return serve_directory(ctx, serve, &target, logger).await;
    }

    // A trailing slash names a directory; a regular file never matches it
    if ctx.path.ends_with('/') {
        return http::build_404_response(FILE_NOT_FOUND, ctx.is_head);
    }

    serve_file(ctx, &target, logger).await
}

/// Serve a directory: redirect to the slash form, then index file, then listing
async fn serve_directory(
    ctx: &RequestContext<'_>,
    serve: &ServeConfig,
    dir: &Path,
    logger: &Logger,
) -> HttpResult {
    if !ctx.path.ends_with('/') {
        // A leading `//` would make the location protocol-relative
        let path = format!("/{}", ctx.path.trim_start_matches('/'));
        let location = match ctx.query {
            Some(query) => format!("{path}/?{query}"),
            None => format!("{path}/"),
        };
        return http::build_redirect_response(&location);
    }

    for index_file in &serve.index_files {
        let index_path = dir.join(index_file);
        if fs::metadata(&index_path).await.is_ok_and(|m| m.is_file()) {
            return serve_file(ctx, &index_path, logger).await;
        }
    }

    if !serve.directory_listing {
        return http::build_404_response(NO_LISTING, ctx.is_head);
    }

    match listing::read_entries(dir).await {
        Ok(entries) => {
            let display_path = percent_decode_str(ctx.path).decode_utf8_lossy();
            http::build_html_response(listing::render(&display_path, &entries), ctx.is_head)
        }
        Err(e) => {
            logger.log_warning(&format!("Failed to list '{}': {e}", dir.display()));
            http::build_404_response(NO_LISTING, ctx.is_head)
        }
    }
}

/// Serve a single regular file, honouring `If-Modified-Since`
async fn serve_file(ctx: &RequestContext<'_>, file_path: &Path, logger: &Logger) -> HttpResult {
    let metadata = match fs::metadata(file_path).await {
        Ok(m) => m,
        Err(e) => {
            logger.log_warning(&format!("Failed to stat '{}': {e}", file_path.display()));
            return http::build_404_response(FILE_NOT_FOUND, ctx.is_head);
        }
    };

    let modified = metadata.modified().ok();
    let last_modified = modified.map(cache::format_http_date);

    // If-None-Match takes precedence over If-Modified-Since
    if !ctx.has_if_none_match {
        if let (Some(modified), Some(last_modified)) = (modified, last_modified.as_deref()) {
            if cache::not_modified_since(ctx.if_modified_since.as_deref(), modified) {
                return http::build_304_response(last_modified);
            }
        }
    }

    let content = match fs::read(file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger.log_error(&format!(
                "Failed to read file '{}': {}",
                file_path.display(),
                e
            ));
            return http::build_404_response(FILE_NOT_FOUND, ctx.is_head);
        }
    };

    http::build_file_response(
        Bytes::from(content),
        mime::content_type_for_path(file_path),
        last_modified.as_deref(),
        ctx.is_head,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::header::{CONTENT_TYPE, LAST_MODIFIED, LOCATION};
    use hyper::StatusCode;

    struct Site {
        _dir: tempfile::TempDir,
        serve: ServeConfig,
        logger: Logger,
    }

    fn site() -> Site {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::write(root.join("app.js"), "console.log('hi');").unwrap();
        std::fs::create_dir(root.join("docs")).unwrap();
        std::fs::write(root.join("docs").join("guide.txt"), "guide").unwrap();
        std::fs::create_dir(root.join("site")).unwrap();
        std::fs::write(root.join("site").join("index.htm"), "<p>site</p>").unwrap();

        let serve = ServeConfig::new(root, "127.0.0.1:0".parse().unwrap()).unwrap();
        Site {
            _dir: dir,
            serve,
            logger: Logger::default(),
        }
    }

    fn ctx(path: &str) -> RequestContext<'_> {
        RequestContext {
            path,
            query: None,
            is_head: false,
            if_modified_since: None,
            has_if_none_match: false,
        }
    }

    async fn get(site: &Site, ctx: &RequestContext<'_>) -> (StatusCode, Response<Full<Bytes>>) {
        let response = serve_path(ctx, &site.serve, &site.logger).await.unwrap();
        (response.status(), response)
    }

    async fn body(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_serves_file_with_type() {
        let site = site();
        let (status, response) = get(&site, &ctx("/app.js")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/javascript");
        assert!(response.headers().contains_key(LAST_MODIFIED));
        assert_eq!(body(response).await, "console.log('hi');");
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let site = site();
        let (status, _) = get(&site, &ctx("/nope.html")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_file_with_trailing_slash_is_404() {
        let site = site();
        let (status, _) = get(&site, &ctx("/app.js/")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_directory_without_slash_redirects() {
        let site = site();
        let mut request = ctx("/docs");
        request.query = Some("lang=en");
        let (status, response) = get(&site, &request).await;
        assert_eq!(status, StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[LOCATION], "/docs/?lang=en");
    }

    #[tokio::test]
    async fn test_redirect_collapses_leading_slashes() {
        let site = site();
        for path in ["//docs", "///docs"] {
            let (status, response) = get(&site, &ctx(path)).await;
            assert_eq!(status, StatusCode::MOVED_PERMANENTLY, "{path}");
            assert_eq!(response.headers()[LOCATION], "/docs/");
        }
    }

    #[tokio::test]
    async fn test_directory_index_file() {
        let site = site();
        let (status, response) = get(&site, &ctx("/site/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/html; charset=utf-8");
        assert_eq!(body(response).await, "<p>site</p>");
    }

    #[tokio::test]
    async fn test_directory_listing() {
        let site = site();
        let (status, response) = get(&site, &ctx("/docs/")).await;
        assert_eq!(status, StatusCode::OK);
        let html = body(response).await;
        assert!(html.contains("Directory listing for /docs/"));
        assert!(html.contains("<a href=\"guide.txt\">guide.txt</a>"));
    }

    #[tokio::test]
    async fn test_listing_disabled() {
        let mut site = site();
        site.serve.directory_listing = false;
        let (status, response) = get(&site, &ctx("/docs/")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body(response).await.contains(NO_LISTING));
    }

    #[tokio::test]
    async fn test_traversal_never_leaves_root() {
        let site = site();
        let (status, response) = get(&site, &ctx("/../../../../etc/passwd")).await;
        // Resolves to <root>/etc/passwd, which does not exist
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(!body(response).await.contains("root:"));
    }

    #[tokio::test]
    async fn test_if_modified_since() {
        let site = site();
        let mut request = ctx("/app.js");
        request.if_modified_since = Some("Fri, 31 Dec 9999 23:59:59 GMT".to_string());
        let (status, response) = get(&site, &request).await;
        assert_eq!(status, StatusCode::NOT_MODIFIED);
        assert_eq!(body(response).await, "");

        request.has_if_none_match = true;
        let (status, _) = get(&site, &request).await;
        assert_eq!(status, StatusCode::OK);

        request.has_if_none_match = false;
        request.if_modified_since = Some("Thu, 01 Jan 1970 00:00:00 GMT".to_string());
        let (status, _) = get(&site, &request).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_head_has_no_body() {
        let site = site();
        let mut request = ctx("/docs/guide.txt");
        request.is_head = true;
        let (status, response) = get(&site, &request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.headers()["content-length"], "5");
        assert_eq!(body(response).await, "");
    }
}
