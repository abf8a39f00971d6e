//! Content types shared by the hook registry, the scanner and the CLI.
//!
//! A [`ContentItem`] is created by the scanner for every discovered source
//! file and handed by mutable reference to each `content_object_init`
//! receiver. Receivers augment [`ContentItem::metadata`] in place; nothing
//! else about the item changes after construction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata attached to a content item.
///
/// Ordered so inventory output and manifest JSON are deterministic.
pub type Metadata = BTreeMap<String, String>;

/// Which content path list a source file was discovered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// A dated blog post found under one of `article_paths`.
    Article,
    /// A standalone page found under one of `page_paths`.
    Page,
}

/// A discovered source file the generator will render into output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub kind: ContentKind,
    /// Path of the source file relative to the content root, `/`-separated.
    pub source_path: String,
    #[serde(default)]
    pub metadata: Metadata,
}

impl ContentItem {
    pub fn new(kind: ContentKind, source_path: impl Into<String>) -> Self {
        Self {
            kind,
            source_path: source_path.into(),
            metadata: Metadata::new(),
        }
    }

    /// Look up a metadata value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_has_empty_metadata() {
        let item = ContentItem::new(ContentKind::Article, "blog/2024-01-15-hello.md");
        assert_eq!(item.source_path, "blog/2024-01-15-hello.md");
        assert!(item.metadata.is_empty());
        assert_eq!(item.get("filename"), None);
    }

    #[test]
    fn kind_serializes_lowercase() {
        let item = ContentItem::new(ContentKind::Page, "pages/about.md");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "page");
        assert_eq!(json["source_path"], "pages/about.md");
    }
}
