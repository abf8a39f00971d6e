//! Markdown header metadata.
//!
//! Posts open with a block of `Key: value` lines, ended by the first blank
//! line:
//!
//! ```text
//! Title: Apache DataFusion 46.0.0 Released
//! Date: 2025-03-20
//! Author: pmc
//! Categories: release
//!
//! Body text...
//! ```
//!
//! Keys are lowercased. An indented line continues the previous value. The
//! first line that is neither a header nor a continuation ends the block, so
//! a file without a header yields no metadata.

use crate::types::Metadata;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

static HEADER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_-]+):[ \t]*(.*)$").expect("header pattern is valid")
});

/// Parse the leading header block of a markdown document.
pub fn read_header(text: &str) -> Metadata {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut metadata = Metadata::new();
    let mut last_key: Option<String> = None;

    for line in text.lines() {
        if line.trim().is_empty() {
            break;
        }
        if line.starts_with([' ', '\t']) {
            match last_key.as_ref().and_then(|k| metadata.get_mut(k)) {
                Some(value) => {
                    if !value.is_empty() {
                        value.push(' ');
                    }
                    value.push_str(line.trim());
                    continue;
                }
                None => break,
            }
        }
        let Some(caps) = HEADER_LINE.captures(line) else {
            break;
        };
        let (_, [key, value]) = caps.extract();
        let key = key.to_ascii_lowercase();
        metadata.insert(key.clone(), value.trim().to_string());
        last_key = Some(key);
    }

    metadata
}

/// Read a markdown file and parse its header block.
pub fn read_file(path: &Path) -> Result<Metadata, ReaderError> {
    let text = std::fs::read_to_string(path).map_err(|source| ReaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(read_header(&text))
}
