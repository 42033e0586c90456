//! Recursive mapping merge — the override side always wins.

use serde_yaml::{Mapping, Value};

/// Merge `overrides` into `base` and return the combined mapping.
///
/// When a key holds a mapping on both sides the two are merged
/// recursively; in every other case the override value replaces the base
/// value outright, whatever its type. Keys present on only one side pass
/// through unchanged. Neither input is mutated.
#[must_use]
pub fn merge_mappings(base: &Mapping, overrides: &Mapping) -> Mapping {
    let mut merged = base.clone();
    for (key, value) in overrides {
        let combined = match (merged.get(key), value) {
            (Some(Value::Mapping(under)), Value::Mapping(over)) => {
                Value::Mapping(merge_mappings(under, over))
            }
            _ => value.clone(),
        };
        merged.insert(key.clone(), combined);
    }
    merged
}

// ── Unit tests ───────────────────────────────────────────────────────────────
