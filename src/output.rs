//! CLI output formatting.
//!
//! Output is information-first: every content item leads with a positional
//! index and its title, with the source path, slug and rendered locations as
//! indented context lines.
//!
//! ```text
//! Articles
//! 001 Hello World
//!     Source: blog/2024-01-15-hello-world.md
//!     Slug: hello-world
//!     URL: blog/2024/01/15/hello-world
//!     Save as: blog/2024/01/15/hello-world/index.html
//! 002 (notes.md)
//!     Source: blog/notes.md
//!     Slug: notes.md
//!     Error: template "blog/{date:%Y}/..." needs metadata "date"
//!
//! Pages
//! 001 About
//!     Source: pages/about.md
//!     Save as: about.html
//!
//! Missing plugins
//!     asfgenid
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::config::SiteConfig;
use crate::naming::{self, FILENAME_KEY};
use crate::scan::Manifest;
use crate::types::ContentItem;
use crate::urls::{self, LocationIssue};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Header line for an item: titled items show the title, untitled ones show
/// the slug (or source segment) in parens.
///
/// ```text
/// 001 Hello World
/// 002 (notes.md)
/// ```
fn item_header(index: usize, item: &ContentItem) -> String {
    match item.get("title") {
        Some(t) if !t.trim().is_empty() => format!("{} {}", format_index(index), t.trim()),
        _ => {
            let label = item
                .get(FILENAME_KEY)
                .unwrap_or_else(|| naming::final_segment(&item.source_path));
            format!("{} ({})", format_index(index), label)
        }
    }
}

// ============================================================================
// scan
// ============================================================================

/// Format the content inventory for `postmeta scan`.
pub fn format_scan_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = Vec::new();
    let ctx = indent(1);

    lines.push("Articles".to_string());
    for (i, item) in manifest.articles.iter().enumerate() {
        lines.push(item_header(i + 1, item));
        lines.push(format!("{ctx}Source: {}", item.source_path));
        if let Some(slug) = item.get(FILENAME_KEY) {
            lines.push(format!("{ctx}Slug: {slug}"));
        }
        match urls::article_locations(item, &manifest.config) {
            Ok((url, save_as)) => {
                lines.push(format!("{ctx}URL: {url}"));
                lines.push(format!("{ctx}Save as: {save_as}"));
            }
            Err(e) => lines.push(format!("{ctx}Error: {e}")),
        }
    }

    if !manifest.pages.is_empty() {
        lines.push(String::new());
        lines.push("Pages".to_string());
        for (i, item) in manifest.pages.iter().enumerate() {
            lines.push(item_header(i + 1, item));
            lines.push(format!("{ctx}Source: {}", item.source_path));
            match urls::page_save_as(item, &manifest.config) {
                Ok(save_as) => lines.push(format!("{ctx}Save as: {save_as}")),
                Err(e) => lines.push(format!("{ctx}Error: {e}")),
            }
        }
    }

    lines.extend(format_missing_plugins(&manifest.missing_plugins));
    lines
}

pub fn print_scan_output(manifest: &Manifest) {
    for line in format_scan_output(manifest) {
        println!("{}", line);
    }
}

fn format_missing_plugins(missing: &[String]) -> Vec<String> {
    if missing.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![String::new(), "Missing plugins".to_string()];
    lines.extend(missing.iter().map(|name| format!("{}{name}", indent(1))));
    lines
}

// ============================================================================
// slug
// ============================================================================

/// Format `path → slug` lines for `postmeta slug`.
///
/// Paths that do not follow the dated convention are marked as fallbacks.
pub fn format_slug_lines(paths: &[String]) -> Vec<String> {
    paths
        .iter()
        .map(|path| {
            let parsed = naming::parse_post_filename(path);
            if parsed.matched() {
                format!("{path} → {}", parsed.slug)
            } else {
                format!("{path} → {} (fallback)", parsed.slug)
            }
        })
        .collect()
}

pub fn print_slug_lines(paths: &[String]) {
    for line in format_slug_lines(paths) {
        println!("{}", line);
    }
}

// ============================================================================
// check
// ============================================================================

/// Format the `postmeta check` report.
pub fn format_check_output(
    manifest: &Manifest,
    issues: &[LocationIssue],
) -> Vec<String> {
    let mut lines = vec![format!(
        "Found {} {}, {} {}",
        manifest.articles.len(),
        plural(manifest.articles.len(), "article", "articles"),
        manifest.pages.len(),
        plural(manifest.pages.len(), "page", "pages"),
    )];

    let disabled = manifest.config.disabled_outputs();
    if !disabled.is_empty() {
        lines.push(format!("Disabled outputs: {}", disabled.join(", ")));
    }

    if !issues.is_empty() {
        lines.push(String::new());
        lines.push("Location errors".to_string());
        for issue in issues {
            lines.push(format!("{}{}", indent(1), issue.source_path));
            lines.push(format!("{}{}", indent(2), issue.error));
        }
    }

    lines.extend(format_missing_plugins(&manifest.missing_plugins));
    lines
}

pub fn print_check_output(manifest: &Manifest, issues: &[LocationIssue]) {
    for line in format_check_output(manifest, issues) {
        println!("{}", line);
    }
}

fn plural(n: usize, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 { one } else { many }
}

/// One-line site summary printed before command output.
pub fn site_summary(config: &SiteConfig) -> String {
    format!("{} ({})", config.sitename, config.siteurl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContentKind, Metadata};
    use crate::urls::UrlError;

    fn article(source: &str, pairs: &[(&str, &str)]) -> ContentItem {
        let mut item = ContentItem::new(ContentKind::Article, source);
        item.metadata = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Metadata>();
        item
    }

    fn manifest(articles: Vec<ContentItem>, pages: Vec<ContentItem>) -> Manifest {
        Manifest {
            articles,
            pages,
            missing_plugins: vec![],
            config: SiteConfig::default(),
        }
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(999), "999");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn header_prefers_title() {
        let item = article("blog/2024-01-15-x.md", &[("title", "Hello"), ("filename", "x")]);
        assert_eq!(item_header(1, &item), "001 Hello");
    }

    #[test]
    fn header_falls_back_to_slug_then_segment() {
        let item = article("blog/notes.md", &[("filename", "notes.md")]);
        assert_eq!(item_header(2, &item), "002 (notes.md)");

        let bare = article("blog/raw.md", &[]);
        assert_eq!(item_header(3, &bare), "003 (raw.md)");
    }

    #[test]
    fn scan_output_lists_articles_with_locations() {
        let m = manifest(
            vec![article(
                "blog/2024-01-15-hello-world.md",
                &[
                    ("title", "Hello World"),
                    ("date", "2024-01-15"),
                    ("filename", "hello-world"),
                ],
            )],
            vec![],
        );
        let lines = format_scan_output(&m);
        assert_eq!(
            lines,
            vec![
                "Articles",
                "001 Hello World",
                "    Source: blog/2024-01-15-hello-world.md",
                "    Slug: hello-world",
                "    URL: blog/2024/01/15/hello-world",
                "    Save as: blog/2024/01/15/hello-world/index.html",
            ]
        );
    }

    #[test]
    fn scan_output_shows_location_errors_and_missing_plugins() {
        let mut m = manifest(
            vec![article("blog/notes.md", &[("filename", "notes.md")])],
            vec![],
        );
        m.missing_plugins = vec!["asfgenid".to_string()];
        let lines = format_scan_output(&m);
        assert!(lines.iter().any(|l| l.starts_with("    Error: ") && l.contains("\"date\"")));
        assert_eq!(lines[lines.len() - 2], "Missing plugins");
        assert_eq!(lines[lines.len() - 1], "    asfgenid");
    }

    #[test]
    fn scan_output_pages_section() {
        let mut page = ContentItem::new(ContentKind::Page, "pages/about.md");
        page.metadata.insert("title".into(), "About".into());
        page.metadata.insert("path_no_ext".into(), "about".into());
        let lines = format_scan_output(&manifest(vec![], vec![page]));
        assert_eq!(
            lines,
            vec![
                "Articles",
                "",
                "Pages",
                "001 About",
                "    Source: pages/about.md",
                "    Save as: about.html",
            ]
        );
    }

    #[test]
    fn slug_lines_mark_fallbacks() {
        let lines = format_slug_lines(&[
            "blog/2024-01-15-hello-world.md".to_string(),
            "notes.md".to_string(),
        ]);
        assert_eq!(
            lines,
            vec![
                "blog/2024-01-15-hello-world.md → hello-world",
                "notes.md → notes.md (fallback)",
            ]
        );
    }

    #[test]
    fn check_output_counts_and_errors() {
        let m = manifest(vec![article("blog/a.md", &[])], vec![]);
        let issues = vec![LocationIssue {
            source_path: "blog/a.md".to_string(),
            error: UrlError::InvalidDate("2024-13-99".to_string()),
        }];
        let lines = format_check_output(&m, &issues);
        assert_eq!(lines[0], "Found 1 article, 0 pages");
        assert!(lines[1].starts_with("Disabled outputs: index, tags"));
        assert!(lines.contains(&"Location errors".to_string()));
        assert!(lines.contains(&"    blog/a.md".to_string()));
        assert!(lines.iter().any(|l| l.contains("2024-13-99")));
    }

    #[test]
    fn summary_uses_site_name_and_url() {
        assert_eq!(
            site_summary(&SiteConfig::default()),
            "Apache DataFusion Blog (https://datafusion.apache.org/blog)"
        );
    }
}
