//! Assembles and executes a single `ansible-playbook` invocation.

use std::path::{Path, PathBuf};
use std::process::Output;

use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::application::ports::CommandRunner;
use crate::domain::error::PlaybookError;
use crate::domain::render::scalar_string;

/// One stateless `ansible-playbook` invocation: the playbook path, the
/// inventory file, a set of CLI flags and the environment overrides.
///
/// Flag serialization is permissive, mirroring the engine's own long-flag
/// convention: `true` becomes `--flag`, `false` is omitted, anything else
/// becomes `--flag=value` via its scalar rendering.
pub struct PlaybookCommand<'a, R: CommandRunner> {
    runner: &'a R,
    inventory_file: PathBuf,
    playbook: PathBuf,
    cli: Mapping,
    env: Vec<(String, String)>,
}

impl<'a, R: CommandRunner> PlaybookCommand<'a, R> {
    pub fn new(
        runner: &'a R,
        inventory_file: impl Into<PathBuf>,
        playbook: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            inventory_file: inventory_file.into(),
            playbook: playbook.into(),
            cli: Mapping::new(),
            env: Vec::new(),
        }
    }

    /// Add (or override) one CLI flag.
    pub fn add_cli_arg(&mut self, name: &str, value: impl Into<Value>) {
        self.cli.insert(Value::from(name), value.into());
    }

    /// Add every flag from a mapping, in its iteration order.
    pub fn add_cli_args(&mut self, flags: &Mapping) {
        for (name, value) in flags {
            self.cli.insert(name.clone(), value.clone());
        }
    }

    /// Add one environment variable for the subprocess.
    pub fn add_env_arg(&mut self, name: &str, value: &str) {
        self.env.push((name.to_string(), value.to_string()));
    }

    /// The playbook path this command runs.
    #[must_use]
    pub fn playbook(&self) -> &Path {
        &self.playbook
    }

    /// The complete argument vector, flags in insertion order.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            self.playbook.display().to_string(),
            "--inventory".to_string(),
            self.inventory_file.display().to_string(),
        ];
        for (name, value) in &self.cli {
            let name = match name.as_str() {
                Some(name) => name.to_string(),
                None => scalar_string(name),
            };
            match value {
                Value::Bool(false) => {}
                Value::Bool(true) => args.push(format!("--{name}")),
                other => args.push(format!("--{name}={}", scalar_string(other))),
            }
        }
        args
    }

    /// Spawn `ansible-playbook`, block until it exits, and return its
    /// captured stdout.
    ///
    /// # Errors
    ///
    /// A non-zero exit is fatal: it surfaces as [`PlaybookError::Failed`]
    /// carrying the exit status and captured stderr. No retry, no
    /// partial-success interpretation.
    pub async fn execute(&self) -> Result<String> {
        let args = self.args();
        debug!(playbook = %self.playbook.display(), "running ansible-playbook");
        let output = self
            .runner
            .run("ansible-playbook", &args, &self.env)
            .await
            .context("failed to run ansible-playbook")?;
        output_to_stdout(output)
    }
}

fn output_to_stdout(output: Output) -> Result<String> {
    if !output.status.success() {
        return Err(PlaybookError::Failed {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
        .into());
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
