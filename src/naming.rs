//! Filename parsing for the `YYYY-MM-DD-slug.md` post convention.
//!
//! Blog posts are named with a date prefix followed by the slug that ends up
//! in the post URL:
//!
//! - `2024-01-15-hello-world.md` → `hello-world`
//! - `blog/2024-01-15-hello-world.md` → `hello-world` (only the last segment counts)
//! - `notes.md` → `notes.md` (no date prefix, the segment is used verbatim)
//!
//! The date is matched as digits only. `2024-13-99-bad-date.md` still yields
//! `bad-date`; calendar validation happens later, if at all, from the post's
//! own `Date:` header.
//!
//! The match is anchored at the start of the segment but not at the end, so
//! `2024-01-15-hello-world.md.bak` also yields `hello-world`.

use crate::types::ContentItem;
use regex::Regex;
use std::sync::LazyLock;

/// Metadata key written by [`extract_filename_metadata`].
pub const FILENAME_KEY: &str = "filename";

static POST_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4}-[0-9]{2}-[0-9]{2})-([-_.a-zA-Z0-9]+)\.md")
        .expect("post filename pattern is valid")
});

/// Result of parsing a post filename like `2024-01-15-hello-world.md`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFilename<'a> {
    /// Date prefix as written (`"2024-01-15"`), not validated. `None` on fallback.
    pub date: Option<&'a str>,
    /// Identifier for the item: the name between date and `.md` when the
    /// convention matches, otherwise the whole final segment.
    pub slug: &'a str,
}

impl ParsedFilename<'_> {
    /// Whether the filename followed the dated convention.
    pub fn matched(&self) -> bool {
        self.date.is_some()
    }
}

/// Final `/`-separated segment of a path, or the whole string without a `/`.
pub fn final_segment(source_path: &str) -> &str {
    source_path
        .rsplit_once('/')
        .map_or(source_path, |(_, last)| last)
}

/// Parse the final segment of `source_path`.
///
/// Total over all inputs: an empty path yields an empty fallback slug.
pub fn parse_post_filename(source_path: &str) -> ParsedFilename<'_> {
    let segment = final_segment(source_path);
    match POST_FILENAME.captures(segment) {
        Some(caps) => {
            let (_, [date, slug]) = caps.extract();
            ParsedFilename {
                date: Some(date),
                slug,
            }
        }
        None => ParsedFilename {
            date: None,
            slug: segment,
        },
    }
}

/// Derive the slug for `source_path`.
pub fn slug_for(source_path: &str) -> &str {
    parse_post_filename(source_path).slug
}

/// `content_object_init` receiver: set `metadata["filename"]` from the
/// item's source path. Touches no other key.
pub fn extract_filename_metadata(item: &mut ContentItem) {
    let slug = slug_for(&item.source_path).to_string();
    item.metadata.insert(FILENAME_KEY.to_string(), slug);
}
