//! Content discovery and hook dispatch.
//!
//! Walks the configured article and page directories, builds one
//! [`ContentItem`] per markdown file and fires `content_object_init` on it
//! exactly once.
//!
//! ## Directory Structure
//!
//! ```text
//! site/
//! ├── config.toml
//! └── content/
//!     ├── README.md                          # ignored (ignore_files)
//!     ├── blog/
//!     │   ├── 2024-01-15-hello-world.md      # article, filename = "hello-world"
//!     │   ├── notes.md                       # article, filename = "notes.md"
//!     │   └── images/chart.png               # not markdown, skipped
//!     ├── pages/
//!     │   ├── about.md                       # page, path_no_ext = "about"
//!     │   └── legacy.html                    # html reader disabled, skipped
//!     └── theme/                             # ignored (ignore_files)
//! ```
//!
//! ## Metadata Order
//!
//! For every item, metadata is built in this order:
//!
//! 1. `path_metadata` named captures from the source path
//! 2. the markdown header block (header values win)
//! 3. `content_object_init` receivers, in plugin registration order
//!
//! A file reachable from both a page path and an article path is a page.

use crate::config::{self, SiteConfig};
use crate::plugins;
use crate::reader;
use crate::signals::Signals;
use crate::types::{ContentItem, ContentKind, Metadata};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Reader error: {0}")]
    Reader(#[from] reader::ReaderError),
}

/// Extensions handled by the markdown reader.
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "mkd", "mdown"];

/// Everything discovered under the content root.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub articles: Vec<ContentItem>,
    pub pages: Vec<ContentItem>,
    /// Configured plugins with no built-in implementation.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_plugins: Vec<String>,
    pub config: SiteConfig,
}

/// Load `config.toml` from `root`, register plugins and discover content.
pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;
    let mut signals = Signals::new();
    let loaded = plugins::load_plugins(&config, &mut signals);

    let content_root = root.join(&config.content_root);
    let (articles, pages) = scan_content(&content_root, &config, &signals)?;

    tracing::info!(
        articles = articles.len(),
        pages = pages.len(),
        root = %content_root.display(),
        "scan complete"
    );

    Ok(Manifest {
        articles,
        pages,
        missing_plugins: loaded.missing,
        config,
    })
}

/// Discover articles and pages under `content_root` using an already
/// populated [`Signals`].
pub fn scan_content(
    content_root: &Path,
    config: &SiteConfig,
    signals: &Signals,
) -> Result<(Vec<ContentItem>, Vec<ContentItem>), ScanError> {
    let path_metadata = config.path_metadata_regex()?;
    let mut seen = BTreeSet::new();

    let pages = collect_kind(
        content_root,
        &config.page_paths,
        ContentKind::Page,
        config,
        &path_metadata,
        signals,
        &mut seen,
    )?;
    let articles = collect_kind(
        content_root,
        &config.article_paths,
        ContentKind::Article,
        config,
        &path_metadata,
        signals,
        &mut seen,
    )?;

    Ok((articles, pages))
}

fn collect_kind(
    content_root: &Path,
    dirs: &[String],
    kind: ContentKind,
    config: &SiteConfig,
    path_metadata: &Regex,
    signals: &Signals,
    seen: &mut BTreeSet<String>,
) -> Result<Vec<ContentItem>, ScanError> {
    let mut items = Vec::new();

    for dir in dirs {
        let base = content_root.join(dir);
        if !base.is_dir() {
            tracing::debug!(path = %base.display(), ?kind, "content directory missing, skipping");
            continue;
        }

        let walker = WalkDir::new(&base)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_ignored(e, &config.ignore_files));

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() || !is_readable(entry.path(), config) {
                continue;
            }

            let source_path = relative_source_path(entry.path(), content_root);
            if !seen.insert(source_path.clone()) {
                continue;
            }

            let mut item = ContentItem::new(kind, source_path);
            item.metadata = path_captures(path_metadata, &item.source_path);
            item.metadata.extend(reader::read_file(entry.path())?);
            signals.send_content_object_init(&mut item);

            tracing::trace!(source = %item.source_path, ?kind, "initialized content item");
            items.push(item);
        }
    }

    items.sort_by(|a, b| a.source_path.cmp(&b.source_path));
    Ok(items)
}

fn is_ignored(entry: &DirEntry, ignore_files: &[String]) -> bool {
    let name = entry.file_name().to_string_lossy();
    ignore_files.iter().any(|ignored| *ignored == name)
}

/// Whether the markdown reader handles this file and its reader is enabled.
fn is_readable(path: &Path, config: &SiteConfig) -> bool {
    let Some(ext) = path.extension().map(|e| e.to_string_lossy().to_ascii_lowercase()) else {
        return false;
    };
    MARKDOWN_EXTENSIONS.contains(&ext.as_str())
        && !config
            .disabled_readers
            .iter()
            .any(|r| r.eq_ignore_ascii_case(&ext))
}

/// `path` relative to `content_root`, joined with `/` on every platform.
fn relative_source_path(path: &Path, content_root: &Path) -> String {
    let rel = path.strip_prefix(content_root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Named captures of `pattern` against `source_path`, as metadata.
fn path_captures(pattern: &Regex, source_path: &str) -> Metadata {
    let Some(caps) = pattern.captures(source_path) else {
        return Metadata::new();
    };
    pattern
        .capture_names()
        .flatten()
        .filter_map(|name| {
            caps.name(name)
                .map(|m| (name.to_string(), m.as_str().to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::fs;

    #[test]
    fn articles_get_filename_slug() {
        let site = setup_site();
        let manifest = scan(site.path()).unwrap();

        let post = find_item(&manifest.articles, "blog/2024-01-15-hello-world.md");
        assert_eq!(post.get("filename"), Some("hello-world"));
        assert_eq!(post.get("title"), Some("Hello World"));

        let notes = find_item(&manifest.articles, "blog/notes.md");
        assert_eq!(notes.get("filename"), Some("notes.md"));
    }

    #[test]
    fn pages_get_path_metadata_and_slug() {
        let site = setup_site();
        let manifest = scan(site.path()).unwrap();

        let about = find_item(&manifest.pages, "pages/about.md");
        assert_eq!(about.kind, ContentKind::Page);
        assert_eq!(about.get("path_no_ext"), Some("about"));
        assert_eq!(about.get("filename"), Some("about.md"));

        let nested = find_item(&manifest.pages, "pages/community/contributing.md");
        assert_eq!(nested.get("path_no_ext"), Some("community/contributing"));
    }

    #[test]
    fn ignored_and_unreadable_files_are_skipped() {
        let site = setup_site();
        let manifest = scan(site.path()).unwrap();

        let all = source_paths(&manifest.articles)
            .into_iter()
            .chain(source_paths(&manifest.pages))
            .collect::<Vec<_>>();
        assert!(!all.iter().any(|p| p.ends_with("README.md")));
        assert!(!all.iter().any(|p| p.ends_with(".html")));
        assert!(!all.iter().any(|p| p.ends_with(".png")));
        assert!(!all.iter().any(|p| p.contains("theme/")));
    }

    #[test]
    fn items_are_sorted_by_source_path() {
        let site = setup_site();
        let manifest = scan(site.path()).unwrap();
        assert_eq!(
            source_paths(&manifest.articles),
            vec![
                "blog/2024-01-15-hello-world.md",
                "blog/2024-13-99-bad-date.md",
                "blog/notes.md",
            ]
        );
    }

    #[test]
    fn missing_plugins_reported() {
        let site = setup_site();
        let manifest = scan(site.path()).unwrap();
        assert_eq!(manifest.missing_plugins, vec!["asfgenid".to_string()]);
    }

    #[test]
    fn extractor_not_listed_leaves_filename_unset() {
        let site = setup_site();
        fs::write(site.path().join("config.toml"), "plugins = []\n").unwrap();
        let manifest = scan(site.path()).unwrap();
        assert!(manifest.articles.iter().all(|a| a.get("filename").is_none()));
    }

    #[test]
    fn receivers_fire_once_per_item() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let site = setup_site();
        let config = SiteConfig::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let mut signals = Signals::new();
        let counter = Arc::clone(&calls);
        signals.connect_content_object_init(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let (articles, pages) =
            scan_content(&site.path().join("content"), &config, &signals).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), articles.len() + pages.len());
    }

    #[test]
    fn overlapping_paths_yield_one_item() {
        let site = setup_site();
        fs::write(
            site.path().join("config.toml"),
            "article_paths = [\".\"]\nignore_files = [\"theme\", \"README.md\"]\n",
        )
        .unwrap();
        let manifest = scan(site.path()).unwrap();

        // pages/about.md is a page, not also an article
        assert!(manifest.pages.iter().any(|p| p.source_path == "pages/about.md"));
        assert!(!manifest
            .articles
            .iter()
            .any(|a| a.source_path == "pages/about.md"));
    }

    #[test]
    fn missing_content_directories_are_not_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert!(manifest.articles.is_empty());
        assert!(manifest.pages.is_empty());
    }

    #[test]
    fn header_overrides_path_metadata() {
        let site = setup_site();
        fs::write(
            site.path().join("content/pages/about.md"),
            "Title: About\npath_no_ext: about-us\n\nBody\n",
        )
        .unwrap();
        let manifest = scan(site.path()).unwrap();
        let about = find_item(&manifest.pages, "pages/about.md");
        assert_eq!(about.get("path_no_ext"), Some("about-us"));
    }

    #[test]
    fn path_captures_anchor_at_start() {
        let config = SiteConfig::default();
        let re = config.path_metadata_regex().unwrap();
        assert!(path_captures(&re, "blog/pages/x.md").is_empty());
        assert_eq!(path_captures(&re, "pages/x.md")["path_no_ext"], "x");
    }
}
