//! Loads a scenario file from disk.

use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::config::ScenarioConfig;

/// Read and parse a scenario file (`crucible.yml`).
///
/// Filesystem and parse errors propagate with the offending path attached;
/// nothing is masked or defaulted on failure.
pub fn load_scenario(path: &Path) -> Result<ScenarioConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
}

// ── Unit tests ───────────────────────────────────────────────────────────────
