//! Builds the grouped host inventory handed to `ansible-playbook`.
//!
//! The inventory is a plain YAML mapping shaped like:
//!
//! ```yaml
//! ungrouped:
//!   hosts:
//!     instance-1:
//!       ansible_connection: docker
//! web:
//!   hosts:
//!     instance-2:
//!       ansible_connection: docker
//! ```

use serde_yaml::{Mapping, Value};

use crate::domain::config::Platform;
use crate::domain::error::ScenarioError;

/// Group assigned to platforms that declare no groups of their own.
pub const UNGROUPED: &str = "ungrouped";

/// Build the inventory mapping for the given platforms.
///
/// Every platform's name is inserted as a host key under every group it
/// declares membership in, with `resolve` supplying the per-platform
/// connection options. Output order is insertion order and carries no
/// meaning to consumers.
pub fn build_inventory<F>(platforms: &[Platform], resolve: F) -> Mapping
where
    F: Fn(&Platform) -> Mapping,
{
    let mut inventory = Mapping::new();
    for platform in platforms {
        for group in platform.group_names() {
            let hosts = nested_map(nested_map(&mut inventory, group), "hosts");
            hosts.insert(
                Value::from(platform.name.as_str()),
                Value::Mapping(resolve(platform)),
            );
        }
    }
    inventory
}

/// Reject an empty inventory before it reaches disk.
///
/// An inventory with no hosts is a user configuration error, not a silent
/// no-op: the scenario file is missing its `platforms` declarations.
pub fn verify_inventory(inventory: &Mapping) -> Result<(), ScenarioError> {
    if inventory.is_empty() {
        return Err(ScenarioError::MissingPlatforms);
    }
    Ok(())
}

/// Auto-vivifying nested-map accessor: returns the mapping stored under
/// `key`, creating (and storing) an empty one when the key is missing or
/// holds a non-mapping value.
fn nested_map<'a>(map: &'a mut Mapping, key: &str) -> &'a mut Mapping {
    let key = Value::from(key);
    if !matches!(map.get(&key), Some(Value::Mapping(_))) {
        map.insert(key.clone(), Value::Mapping(Mapping::new()));
    }
    match map.get_mut(&key) {
        Some(Value::Mapping(inner)) => inner,
        _ => unreachable!("a mapping was stored under this key above"),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
