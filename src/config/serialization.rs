//! Config serialization to TOML
//!
//! Single source of truth for the config file format.

use super::Config;
use std::collections::BTreeMap;

/// TOML string literal with escaping
fn quoted(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

/// Bare key when TOML allows it, quoted otherwise
fn key(k: &str) -> String {
    let bare = !k.is_empty()
        && k
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if bare {
        k.to_string()
    } else {
        quoted(k)
    }
}

/// `[name]` table, or a commented example when `map` is empty
fn table_to_toml(name: &str, map: &BTreeMap<String, String>, example: &str) -> String {
    if map.is_empty() {
        return format!("\n# [{}]\n# {}\n", name, example);
    }

    let mut output = format!("\n[{}]\n", name);
    for (k, v) in map {
        output.push_str(&format!("{} = {}\n", key(k), quoted(v)));
    }
    output
}

impl Config {
    /// Serialize to a commented config file
    pub fn to_toml(&self) -> String {
        let c = &self.collection;
        let columns = c
            .columns
            .iter()
            .map(|col| quoted(col))
            .collect::<Vec<_>>()
            .join(", ");

        let mut output = format!(
            r#"# carelist configuration

# Backend base URL (CARELIST_API_URL overrides; token comes from CARELIST_TOKEN)
api_url = {api_url}

# Per-request timeout in seconds
timeout_secs = {timeout}

# Theme: dark, light, terminal
theme = {theme}

# Collection to browse
[collection]
# Route template, {{name}} placeholders are filled from [collection.path_params]
route = {route}
per_page = {per_page}
initial_page = {initial_page}
# Item fields shown as table columns
columns = [{columns}]
# Hide the paginator when everything fits on one page
hide_if_single_page = {hide}
# Log fetch failures at debug instead of warn
silent = {silent}
"#,
            api_url = quoted(&self.api_url),
            timeout = self.timeout_secs,
            theme = quoted(&self.theme),
            route = quoted(&c.route),
            per_page = c.per_page,
            initial_page = c.initial_page,
            columns = columns,
            hide = c.hide_if_single_page,
            silent = c.silent,
        );

        output.push_str(&table_to_toml(
            "collection.filters",
            &c.filters,
            "gender = \"female\"",
        ));
        output.push_str(&table_to_toml(
            "collection.path_params",
            &c.path_params,
            "facility = \"2a6f...\"",
        ));
        output.push_str(&table_to_toml(
            "collection.headers",
            &c.headers,
            "X-Facility-Id = \"2a6f...\"",
        ));

        let l = &self.logging;
        output.push_str(&format!(
            r#"
# Logging (RUST_LOG overrides level)
[logging]
level = {level}
# JSON lines file (in addition to the TUI buffer or stderr)
file_enabled = {file_enabled}
file_dir = {file_dir}
file_rotation = {rotation}  # hourly, daily, never
file_prefix = {prefix}
"#,
            level = quoted(&l.level),
            file_enabled = l.file_enabled,
            file_dir = quoted(&l.file_dir.display().to_string()),
            rotation = quoted(l.file_rotation.as_str()),
            prefix = quoted(&l.file_prefix),
        ));

        output
    }
}
