//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra` or `crate::application`.
//! All error types implement `thiserror::Error` and convert to
//! `anyhow::Error` via the `?` operator.

use std::process::ExitStatus;

use thiserror::Error;

// ── Scenario errors ───────────────────────────────────────────────────────────

/// Errors raised while validating the scenario configuration.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Instances missing from the 'platforms' section of crucible.yml.")]
    MissingPlatforms,
}

// ── Playbook errors ───────────────────────────────────────────────────────────

/// Errors raised by an `ansible-playbook` invocation.
#[derive(Debug, Error)]
pub enum PlaybookError {
    #[error("ansible-playbook exited with {status}\n{stderr}")]
    Failed { status: ExitStatus, stderr: String },
}
