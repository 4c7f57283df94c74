//! Directory listing module
//!
//! Renders an HTML index of a directory when it has no index file.

use crate::http::escape_html;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::io;
use std::path::Path;

/// Characters left unescaped in listing links
const LINK_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// A single listing row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Text shown to the user (`dir/`, `link@`)
    pub display_name: String,
    /// Relative link target (`dir/` for directories)
    pub link_name: String,
}

/// Read and sort the entries of `dir`
///
/// Entries are sorted case-insensitively on the bare name. Directories
/// (including symlinks to directories) link with a trailing `/`; a symlink is
/// displayed with a trailing `@` in place of the `/`.
pub async fn read_entries(dir: &Path) -> io::Result<Vec<ListingEntry>> {
    let mut reader = tokio::fs::read_dir(dir).await?;
    let mut named = Vec::new();

    while let Some(entry) = reader.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_symlink = entry.file_type().await.is_ok_and(|t| t.is_symlink());
        let is_dir = tokio::fs::metadata(entry.path())
            .await
            .is_ok_and(|m| m.is_dir());

        let display_name = if is_symlink {
            format!("{name}@")
        } else if is_dir {
            format!("{name}/")
        } else {
            name.clone()
        };
        let link_name = if is_dir { format!("{name}/") } else { name.clone() };
        named.push((
            name.to_lowercase(),
            ListingEntry {
                display_name,
                link_name,
            },
        ));
    }

    named.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(named.into_iter().map(|(_, entry)| entry).collect())
}

/// Render the listing page for `request_path` (already percent-decoded)
pub fn render(request_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", escape_html(request_path));

    let mut html = String::new();
    html.push_str("<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n</head>\n<body>\n"));
    html.push_str(&format!("<h1>{title}</h1>\n<hr>\n<ul>\n"));
    for entry in entries {
        let href = utf8_percent_encode(&entry.link_name, LINK_SAFE).to_string();
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            escape_html(&href),
            escape_html(&entry.display_name)
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_entries_sorted_and_marked() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "b").unwrap();
        std::fs::write(dir.path().join("A.txt"), "a").unwrap();
        std::fs::create_dir(dir.path().join("css")).unwrap();
        std::fs::write(dir.path().join("css.txt"), "c").unwrap();
        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(dir.path().join("b.txt"), dir.path().join("latest")).unwrap();
            std::os::unix::fs::symlink(dir.path().join("css"), dir.path().join("styles")).unwrap();
        }

        let entries = read_entries(dir.path()).await.unwrap();
        let shown: Vec<&str> = entries.iter().map(|e| e.display_name.as_str()).collect();

        #[cfg(unix)]
        assert_eq!(shown, vec!["A.txt", "b.txt", "css/", "css.txt", "latest@", "styles@"]);
        #[cfg(not(unix))]
        assert_eq!(shown, vec!["A.txt", "b.txt", "css/", "css.txt"]);

        #[cfg(unix)]
        {
            let styles = entries.iter().find(|e| e.display_name == "styles@").unwrap();
            assert_eq!(styles.link_name, "styles/");
        }

        let css = entries.iter().find(|e| e.display_name == "css/").unwrap();
        assert_eq!(css.link_name, "css/");
    }

    #[test]
    fn test_render_escapes_and_encodes() {
        let entries = vec![
            ListingEntry {
                display_name: "my file & notes.txt".to_string(),
                link_name: "my file & notes.txt".to_string(),
            },
            ListingEntry {
                display_name: "<img>/".to_string(),
                link_name: "<img>/".to_string(),
            },
        ];
        let html = render("/docs/<x>/", &entries);

        assert!(html.contains("<title>Directory listing for /docs/&lt;x&gt;/</title>"));
        assert!(html.contains(
            "<li><a href=\"my%20file%20%26%20notes.txt\">my file &amp; notes.txt</a></li>"
        ));
        assert!(html.contains("<li><a href=\"%3Cimg%3E/\">&lt;img&gt;/</a></li>"));
    }

    #[test]
    fn test_render_empty_directory() {
        let html = render("/empty/", &[]);
        assert!(html.contains("<ul>\n</ul>"));
    }
}
