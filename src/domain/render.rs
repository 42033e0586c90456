//! Renders the merged engine config into `ansible.cfg` text.

use anyhow::{Context, Result};
use minijinja::{Environment, context};
use serde_yaml::{Mapping, Value};

/// The `ansible.cfg` template. One `[section]` header per top-level key,
/// one `key = value` line per entry, blank line between sections. Values
/// interpolate via their canonical scalar rendering with no validation or
/// escaping; a configuration that writes garbage reads back garbage.
const CONFIG_TEMPLATE: &str = "\
# Crucible managed
{% for section, entries in config_options|items %}
[{{ section }}]
{% for key, value in entries|items %}{{ key }} = {{ value }}
{% endfor %}{% endfor %}";

/// Render a section -> key -> value mapping to config-file text.
///
/// An empty mapping still renders the managed-file header, which is a
/// valid (if pointless) config file for the engine.
pub fn render_config(config_options: &Mapping) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("ansible.cfg", CONFIG_TEMPLATE)
        .context("config template failed to parse")?;
    let template = env
        .get_template("ansible.cfg")
        .context("config template missing")?;
    template
        .render(context! { config_options => minijinja::Value::from_serialize(config_options) })
        .context("config template failed to render")
}

/// Permissive scalar rendering shared by the config template's sibling,
/// the CLI-flag serializer. Mappings and sequences fall back to their
/// YAML rendering — garbage in, garbage out.
#[must_use]
pub fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
