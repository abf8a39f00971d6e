//! # postmeta
//!
//! Slug metadata for a markdown blog published by a static site generator.
//! Posts are named `YYYY-MM-DD-slug.md`; the `extract_date_from_filename`
//! plugin turns that name into `metadata["filename"] = "slug"`, which the
//! article URL template then uses:
//!
//! ```text
//! content/blog/2024-01-15-hello-world.md
//!   → filename = "hello-world"
//!   → blog/2024/01/15/hello-world/index.html
//! ```
//!
//! # Flow
//!
//! ```text
//! config.toml ─→ SiteConfig ─→ load_plugins ─→ Signals
//!                                                 │
//! content/ ─→ scan ─→ ContentItem ─→ content_object_init (once per item)
//!                                                 │
//!                                       urls::render(templates)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | `YYYY-MM-DD-slug.md` parser and the `filename` metadata receiver |
//! | [`signals`] | Explicit hook registry (`content_object_init`) |
//! | [`plugins`] | Built-in plugin table, loaded in configured order |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`scan`] | Content discovery; fires the hook once per discovered item |
//! | [`reader`] | `Key: value` header block of markdown files |
//! | [`urls`] | `{key}` / `{date:FMT}` URL and save-as templates |
//! | [`types`] | `ContentItem` and its metadata map |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Total Slug Extraction
//!
//! The extractor never fails. A name that does not follow the convention
//! keeps its final path segment verbatim (`notes.md` → `notes.md`), so every
//! item always gets a `filename` value. Problems surface later, when a URL
//! template needs metadata the item does not have; `postmeta check` reports
//! those.
//!
//! ## No Global Registry
//!
//! Plugins connect receivers to a [`signals::Signals`] value built during
//! setup and passed explicitly to the scanner. Tests build their own.

pub mod config;
pub mod naming;
pub mod output;
pub mod plugins;
pub mod reader;
pub mod scan;
pub mod signals;
pub mod types;
pub mod urls;

#[cfg(test)]
pub(crate) mod test_helpers;
