//! Scenario configuration model and the provisioner's built-in defaults.
//!
//! Pure functions only — no I/O. Merged views are recomputed from the
//! current configuration on every call; nothing here is cached, so they
//! can never drift from a live `ScenarioConfig`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::domain::inventory::UNGROUPED;

// ── Scenario schema ──────────────────────────────────────────────────────────

/// Top-level configuration parsed from a scenario file (`crucible.yml`).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Provisioner settings: engine config overrides and CLI flags.
    pub provisioner: ProvisionerSettings,
    /// Instances to provision.
    pub platforms: Vec<Platform>,
    /// Driver selection and its connection parameters.
    pub driver: DriverSettings,
    /// Run the provisioner with engine debugging enabled.
    pub debug: bool,
}

/// The `provisioner` section of the scenario file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisionerSettings {
    /// Provisioner name; only `ansible` is supported.
    pub name: String,
    /// Engine-level settings merged over [`default_config_options`],
    /// section -> key -> value.
    pub config_options: Mapping,
    /// CLI flags merged over [`default_options`], flag -> value.
    pub options: Mapping,
}

impl Default for ProvisionerSettings {
    fn default() -> Self {
        Self {
            name: "ansible".to_string(),
            config_options: Mapping::new(),
            options: Mapping::new(),
        }
    }
}

/// One provisioned instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    /// Unique instance name; becomes the inventory host key.
    pub name: String,
    /// Inventory groups this instance joins. Absent means the implicit
    /// `ungrouped` group; an explicit empty list means no groups at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
}

impl Platform {
    /// The groups this platform joins, falling back to the implicit group.
    #[must_use]
    pub fn group_names(&self) -> Vec<&str> {
        match &self.groups {
            Some(groups) => groups.iter().map(String::as_str).collect(),
            None => vec![UNGROUPED],
        }
    }
}

/// The `driver` section of the scenario file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverSettings {
    /// Driver name, e.g. `docker`.
    pub name: String,
    /// Connection options handed to hosts when no built-in driver matches.
    pub connection_options: Mapping,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            name: "docker".to_string(),
            connection_options: Mapping::new(),
        }
    }
}

// ── Built-in defaults ────────────────────────────────────────────────────────

/// Warning string written into generated files under `ansible_managed`.
pub const MANAGED_WARNING: &str = "Ansible managed: Do NOT edit this file manually!";

/// Default engine config, as a section -> key -> value mapping.
///
/// User `config_options` are merged over this; the user side wins on
/// collision.
#[must_use]
pub fn default_config_options(filter_plugins_dir: &Path) -> Mapping {
    let mut defaults = Mapping::new();
    defaults.insert(Value::from("ansible_managed"), Value::from(MANAGED_WARNING));
    defaults.insert(Value::from("retry_files_enabled"), Value::from(false));
    defaults.insert(
        Value::from("roles_path"),
        Value::from("../../../../:$ANSIBLE_LIBRARY"),
    );
    defaults.insert(
        Value::from("filter_plugins"),
        Value::from(format!(
            "{}:$ANSIBLE_FILTER_PLUGINS",
            filter_plugins_dir.display()
        )),
    );

    let mut options = Mapping::new();
    options.insert(Value::from("defaults"), Value::Mapping(defaults));
    options
}

/// Default CLI flags handed to `ansible-playbook`.
///
/// User `options` are merged over this; the user side wins on collision.
#[must_use]
pub fn default_options(debug: bool) -> Mapping {
    let mut options = Mapping::new();
    if debug {
        options.insert(Value::from("debug"), Value::from(true));
    }
    options
}

// ── Unit tests ───────────────────────────────────────────────────────────────
