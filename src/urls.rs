//! URL and save-as path templates.
//!
//! Templates come from `[urls]` in `config.toml`:
//!
//! ```text
//! blog/{date:%Y}/{date:%m}/{date:%d}/{filename}
//!   + date = "2024-01-15", filename = "hello-world"
//!   → blog/2024/01/15/hello-world
//! ```
//!
//! `{key}` is replaced with the item's metadata value. `{date:FMT}` parses
//! the item's `date` metadata and formats it with a strftime pattern. Unlike
//! the filename prefix, the `date` header is validated as a calendar date.

use crate::config::SiteConfig;
use crate::types::{ContentItem, Metadata};
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::fmt::Write;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum UrlError {
    #[error("template {template:?} needs metadata {key:?}")]
    MissingKey { template: String, key: String },
    #[error("date {0:?} is not a valid YYYY-MM-DD[ HH:MM[:SS]] date")]
    InvalidDate(String),
    #[error("format {format:?} cannot be applied to {key:?}")]
    InvalidFormat { key: String, format: String },
}

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z0-9_]+)(?::([^}]*))?\}").expect("placeholder pattern is valid")
});

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a `date` metadata value. Date-only values are taken as midnight.
pub fn parse_date(value: &str) -> Result<NaiveDateTime, UrlError> {
    let value = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| UrlError::InvalidDate(value.to_string()))
}

/// Expand every placeholder in `template` from `metadata`.
pub fn render(template: &str, metadata: &Metadata) -> Result<String, UrlError> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(template) {
        let whole = caps.get(0).expect("group 0 always participates");
        out.push_str(&template[last..whole.start()]);
        last = whole.end();

        let key = &caps[1];
        let value = metadata.get(key).ok_or_else(|| UrlError::MissingKey {
            template: template.to_string(),
            key: key.to_string(),
        })?;

        match caps.get(2).map(|m| m.as_str()) {
            None => out.push_str(value),
            Some(format) => {
                let invalid = || UrlError::InvalidFormat {
                    key: key.to_string(),
                    format: format.to_string(),
                };
                if key != "date" {
                    return Err(invalid());
                }
                let date = parse_date(value)?;
                write!(out, "{}", date.format(format)).map_err(|_| invalid())?;
            }
        }
    }

    out.push_str(&template[last..]);
    Ok(out)
}

/// Public URL and output path of an article.
pub fn article_locations(
    item: &ContentItem,
    config: &SiteConfig,
) -> Result<(String, String), UrlError> {
    let url = render(&config.urls.article_url, &item.metadata)?;
    let save_as = render(&config.urls.article_save_as, &item.metadata)?;
    Ok((url, save_as))
}

/// Output path of a page.
pub fn page_save_as(item: &ContentItem, config: &SiteConfig) -> Result<String, UrlError> {
    render(&config.urls.page_save_as, &item.metadata)
}

/// An item whose URL or output path could not be rendered.
#[derive(Debug, PartialEq)]
pub struct LocationIssue {
    pub source_path: String,
    pub error: UrlError,
}

/// Render every article and page location, collecting the failures.
pub fn check_locations(
    articles: &[ContentItem],
    pages: &[ContentItem],
    config: &SiteConfig,
) -> Vec<LocationIssue> {
    let article_errors = articles
        .iter()
        .filter_map(|a| article_locations(a, config).err().map(|e| (a, e)));
    let page_errors = pages
        .iter()
        .filter_map(|p| page_save_as(p, config).err().map(|e| (p, e)));

    article_errors
        .chain(page_errors)
        .map(|(item, error)| LocationIssue {
            source_path: item.source_path.clone(),
            error,
        })
        .collect()
}
