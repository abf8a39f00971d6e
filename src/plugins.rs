//! Built-in plugin table and plugin loading.
//!
//! A plugin is a name plus a register function that connects receivers on
//! [`Signals`]. The site config lists plugins by name, in order; only the ones
//! compiled into this crate can be registered. The blog's config also names
//! plugins provided by the surrounding generator (`asfgenid`), so an unknown
//! name is reported and skipped rather than treated as an error.

use crate::config::SiteConfig;
use crate::naming;
use crate::signals::Signals;
use serde::Serialize;

/// A plugin that can be enabled from `config.toml`.
#[derive(Debug, Clone, Copy)]
pub struct Plugin {
    pub name: &'static str,
    pub register: fn(&mut Signals),
}

/// Plugins compiled into this crate.
pub const BUILTIN_PLUGINS: &[Plugin] = &[Plugin {
    name: "extract_date_from_filename",
    register: register_extract_date_from_filename,
}];

/// Connects [`naming::extract_filename_metadata`] to `content_object_init`.
pub fn register_extract_date_from_filename(signals: &mut Signals) {
    signals.connect_content_object_init(naming::extract_filename_metadata);
}

/// Find a built-in plugin by name.
pub fn find_plugin(name: &str) -> Option<&'static Plugin> {
    BUILTIN_PLUGINS.iter().find(|p| p.name == name)
}

/// Outcome of [`load_plugins`].
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct LoadedPlugins {
    /// Plugins that were registered, in registration order.
    pub registered: Vec<&'static str>,
    /// Configured names with no built-in implementation.
    pub missing: Vec<String>,
}

/// Register every enabled built-in plugin on `signals`, in configured order.
///
/// A name listed twice is registered only at its first position.
pub fn load_plugins(config: &SiteConfig, signals: &mut Signals) -> LoadedPlugins {
    let mut loaded = LoadedPlugins::default();

    for name in &config.plugins {
        let seen = loaded.registered.iter().any(|r| *r == name.as_str())
            || loaded.missing.contains(name);
        if seen {
            tracing::debug!(plugin = %name, "plugin listed more than once, skipping");
            continue;
        }
        match find_plugin(name) {
            Some(plugin) => {
                (plugin.register)(signals);
                tracing::debug!(plugin = plugin.name, "registered plugin");
                loaded.registered.push(plugin.name);
            }
            None => {
                tracing::warn!(
                    plugin = %name,
                    paths = ?config.plugin_paths,
                    "plugin is not built in, skipping"
                );
                loaded.missing.push(name.clone());
            }
        }
    }

    loaded
}
