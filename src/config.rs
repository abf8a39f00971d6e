//! Site configuration module.
//!
//! Handles loading, validating, and merging the site's `config.toml`. User
//! values are merged on top of stock defaults, so a config file only needs the
//! keys it wants to change. The stock defaults describe the published blog.
//!
//! ## Config File Location
//!
//! ```text
//! site/
//! ├── config.toml              # Site config (optional)
//! └── content/                 # content_root
//!     ├── blog/                # article_paths
//!     │   └── 2024-01-15-hello-world.md
//!     ├── pages/               # page_paths
//!     │   └── about.md
//!     └── theme/               # ignored (ignore_files)
//! ```
//!
//! ## Configuration Options
//!
//! Run `postmeta gen-config` for a fully commented sample. Tables:
//!
//! - top level: site identity, content paths, plugins
//! - `[urls]`: article URL and save-as templates, page save-as template
//! - `[outputs]`: index/tag/category/author/archive pages and feeds
//! - `[markdown]`: options handed to the markdown renderer
//!
//! Unknown keys are rejected to catch typos early.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the site root.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub sitename: String,
    pub sitedesc: String,
    pub sitedomain: String,
    pub siteurl: String,
    pub sitelogo: String,
    /// Base URL for "edit this page" links into the source repository.
    pub siterepository: String,
    pub trademarks: String,
    pub timezone: String,
    /// Content directory, relative to the site root.
    pub content_root: String,
    /// Theme directory, relative to the site root.
    pub theme: String,
    /// Directories searched for plugins. Informational: plugins are compiled in.
    pub plugin_paths: Vec<String>,
    /// Enabled plugins, in registration order.
    pub plugins: Vec<String>,
    /// Article directories, relative to `content_root`.
    pub article_paths: Vec<String>,
    /// Page directories, relative to `content_root`.
    pub page_paths: Vec<String>,
    /// Directories copied verbatim, relative to `content_root`.
    pub static_paths: Vec<String>,
    /// Basenames skipped during discovery.
    pub ignore_files: Vec<String>,
    /// Regex applied to page source paths; named groups become metadata.
    pub path_metadata: String,
    /// File extensions that are never read as content.
    pub disabled_readers: Vec<String>,
    pub urls: UrlsConfig,
    pub outputs: OutputsConfig,
    pub markdown: MarkdownConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            sitename: "Apache DataFusion Blog".to_string(),
            sitedesc: "The official news and blog for the Apache DataFusion project".to_string(),
            sitedomain: "datafusion.apache.org".to_string(),
            siteurl: "https://datafusion.apache.org/blog".to_string(),
            sitelogo: "https://datafusion.apache.org/favicon.ico".to_string(),
            siterepository: "https://github.com/apache/datafusion-site/blob/main/content/"
                .to_string(),
            trademarks: "Apache HTTP Server, Apache, and the Apache feather logo are \
                         trademarks of The Apache Software Foundation."
                .to_string(),
            timezone: "UTC".to_string(),
            content_root: "content".to_string(),
            theme: "content/theme".to_string(),
            plugin_paths: vec!["plugins".to_string()],
            plugins: vec![
                "asfgenid".to_string(),
                "extract_date_from_filename".to_string(),
            ],
            article_paths: vec!["blog".to_string()],
            page_paths: vec!["pages".to_string()],
            static_paths: vec![".".to_string()],
            ignore_files: vec!["theme".to_string(), "README.md".to_string()],
            path_metadata: r"pages/(?P<path_no_ext>.*)\..*".to_string(),
            disabled_readers: vec!["html".to_string()],
            urls: UrlsConfig::default(),
            outputs: OutputsConfig::default(),
            markdown: MarkdownConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(e) = Regex::new(&self.path_metadata) {
            return Err(ConfigError::Validation(format!(
                "path_metadata is not a valid regex: {e}"
            )));
        }
        if self.plugins.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "plugins must not contain empty names".into(),
            ));
        }
        for (key, paths) in [
            ("article_paths", &self.article_paths),
            ("page_paths", &self.page_paths),
        ] {
            if let Some(p) = paths.iter().find(|p| Path::new(p).is_absolute()) {
                return Err(ConfigError::Validation(format!(
                    "{key} entries must be relative to content_root, got {p:?}"
                )));
            }
        }
        if !matches!(self.markdown.output_format.as_str(), "html5" | "xhtml") {
            return Err(ConfigError::Validation(
                "markdown.output_format must be \"html5\" or \"xhtml\"".into(),
            ));
        }
        for (key, template) in [
            ("urls.article_url", &self.urls.article_url),
            ("urls.article_save_as", &self.urls.article_save_as),
            ("urls.page_save_as", &self.urls.page_save_as),
        ] {
            if template.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }

    /// Whether `name` appears in the enabled plugin list.
    pub fn plugin_enabled(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p == name)
    }

    /// Compiled `path_metadata` pattern, anchored at the start of the path.
    ///
    /// Only fails for configs that skipped [`SiteConfig::validate`].
    pub fn path_metadata_regex(&self) -> Result<Regex, ConfigError> {
        Regex::new(&format!("^(?:{})", self.path_metadata))
            .map_err(|e| ConfigError::Validation(format!("path_metadata: {e}")))
    }

    /// Names of the outputs switched off in `[outputs]`.
    pub fn disabled_outputs(&self) -> Vec<&'static str> {
        let o = &self.outputs;
        let mut disabled: Vec<&'static str> = [
            ("index", &o.index_save_as),
            ("tags", &o.tags_save_as),
            ("categories", &o.categories_save_as),
            ("authors", &o.authors_save_as),
            ("archives", &o.archives_save_as),
        ]
        .into_iter()
        .filter(|(_, save_as)| save_as.is_empty())
        .map(|(name, _)| name)
        .collect();
        for (name, feed) in [("feed_all_atom", &o.feed_all_atom), ("feed_rss", &o.feed_rss)] {
            if feed.as_deref().is_none_or(str::is_empty) {
                disabled.push(name);
            }
        }
        disabled
    }
}

/// URL and output path templates.
///
/// Templates substitute `{key}` with item metadata and `{date:FMT}` with the
/// item's `date` formatted by a strftime pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UrlsConfig {
    pub article_url: String,
    pub article_save_as: String,
    pub page_save_as: String,
}

impl Default for UrlsConfig {
    fn default() -> Self {
        Self {
            article_url: "blog/{date:%Y}/{date:%m}/{date:%d}/{filename}".to_string(),
            article_save_as: "blog/{date:%Y}/{date:%m}/{date:%d}/{filename}/index.html"
                .to_string(),
            page_save_as: "{path_no_ext}.html".to_string(),
        }
    }
}

/// Listing pages and feeds. An empty save-as path disables that output;
/// feeds are also disabled when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputsConfig {
    pub index_save_as: String,
    pub tags_save_as: String,
    pub categories_save_as: String,
    pub authors_save_as: String,
    pub archives_save_as: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_all_atom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_rss: Option<String>,
}

impl Default for OutputsConfig {
    fn default() -> Self {
        Self {
            index_save_as: String::new(),
            tags_save_as: String::new(),
            categories_save_as: String::new(),
            authors_save_as: String::new(),
            archives_save_as: String::new(),
            feed_all_atom: None,
            feed_rss: Some("blog/feed.xml".to_string()),
        }
    }
}

/// Options handed to the markdown renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownConfig {
    pub extensions: Vec<String>,
    /// Line numbers in highlighted code blocks.
    pub codehilite_linenums: bool,
    pub output_format: String,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["codehilite".to_string(), "fenced_code".to_string()],
            codehilite_linenums: false,
            output_format: "html5".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, so arrays such
///   as `plugins` are replaced, not appended to.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given site root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# postmeta configuration
# ======================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
sitename = "Apache DataFusion Blog"
sitedesc = "The official news and blog for the Apache DataFusion project"
sitedomain = "datafusion.apache.org"
siteurl = "https://datafusion.apache.org/blog"
sitelogo = "https://datafusion.apache.org/favicon.ico"
siterepository = "https://github.com/apache/datafusion-site/blob/main/content/"
trademarks = "Apache HTTP Server, Apache, and the Apache feather logo are trademarks of The Apache Software Foundation."
timezone = "UTC"

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
# Content directory, relative to the site root.
content_root = "content"
theme = "content/theme"

# Directories under content_root. Articles get a "filename" slug from the
# extract_date_from_filename plugin; pages get path_metadata captures.
article_paths = ["blog"]
page_paths = ["pages"]
static_paths = ["."]

# Basenames skipped everywhere (README.md is not meant for publication).
ignore_files = ["theme", "README.md"]

# Named groups become page metadata, e.g. {path_no_ext} in page_save_as.
path_metadata = 'pages/(?P<path_no_ext>.*)\..*'

# Files with these extensions are never read as content.
disabled_readers = ["html"]

# ---------------------------------------------------------------------------
# Plugins (registered in this order)
# ---------------------------------------------------------------------------
plugin_paths = ["plugins"]
plugins = ["asfgenid", "extract_date_from_filename"]

# ---------------------------------------------------------------------------
# URL templates: {key} is item metadata, {date:FMT} is a strftime format
# ---------------------------------------------------------------------------
[urls]
article_url = "blog/{date:%Y}/{date:%m}/{date:%d}/{filename}"
article_save_as = "blog/{date:%Y}/{date:%m}/{date:%d}/{filename}/index.html"
page_save_as = "{path_no_ext}.html"

# ---------------------------------------------------------------------------
# Listing pages and feeds (empty string = disabled)
# ---------------------------------------------------------------------------
[outputs]
index_save_as = ""
tags_save_as = ""
categories_save_as = ""
authors_save_as = ""
archives_save_as = ""
# feed_all_atom = "feeds/all.atom.xml"
feed_rss = "blog/feed.xml"

# ---------------------------------------------------------------------------
# Markdown rendering
# ---------------------------------------------------------------------------
[markdown]
extensions = ["codehilite", "fenced_code"]
codehilite_linenums = false
output_format = "html5"
"##
}
