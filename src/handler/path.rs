//! Request path translation
//!
//! Turns a URL path into a filesystem path under the root directory.

use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};

/// Map a request path onto a path under `root`
///
/// The path is percent-decoded and normalized lexically: empty and `.`
/// segments are dropped and `..` removes the previous segment, never
/// climbing above the root. Segments that still contain a separator or a
/// NUL byte after decoding are discarded.
pub fn translate_path(root: &Path, request_path: &str) -> PathBuf {
    let decoded = percent_decode_str(request_path).decode_utf8_lossy();

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s if s.contains('\\') || s.contains('\0') => {}
            s => segments.push(s),
        }
    }

    let mut path = root.to_path_buf();
    path.extend(segments);
    path
}

/// Check that `candidate` resolves to a location inside `root`
///
/// `root` must already be canonical. Symlinks are followed, so a link that
/// points outside the root is rejected.
pub async fn is_within_root(root: &Path, candidate: &Path) -> bool {
    match tokio::fs::canonicalize(candidate).await {
        Ok(resolved) => resolved.starts_with(root),
        Err(_) => false,
    }
}
