//! Shared test utilities for the postmeta test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let site = setup_site();
//! let manifest = scan(site.path()).unwrap();
//!
//! let post = find_item(&manifest.articles, "blog/2024-01-15-hello-world.md");
//! assert_eq!(post.get("filename"), Some("hello-world"));
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::types::ContentItem;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find an item by source path. Panics if not found.
pub fn find_item<'a>(items: &'a [ContentItem], source_path: &str) -> &'a ContentItem {
    items
        .iter()
        .find(|i| i.source_path == source_path)
        .unwrap_or_else(|| {
            panic!(
                "item '{source_path}' not found. Available: {:?}",
                source_paths(items)
            )
        })
}

/// Source paths of `items`, in order.
pub fn source_paths(items: &[ContentItem]) -> Vec<&str> {
    items.iter().map(|i| i.source_path.as_str()).collect()
}
