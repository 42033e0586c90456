//! The Ansible provisioner: generates the scenario's runtime configuration
//! and drives `ansible-playbook` over it.
//!
//! `AnsibleProvisioner<R, D>` routes all subprocess work through a
//! `CommandRunner` and all connection parameters through a `Driver`, so
//! tests can inject mocks without spawning real processes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_yaml::Mapping;
use tracing::{debug, info};

use crate::application::ports::{CommandRunner, Driver};
use crate::domain::config::{ScenarioConfig, default_config_options, default_options};
use crate::domain::inventory::{build_inventory, verify_inventory};
use crate::domain::merge::merge_mappings;
use crate::domain::render::render_config;
use crate::infra::paths::filter_plugins_directory;
use crate::infra::playbook::PlaybookCommand;

/// File name of the generated inventory inside the ephemeral directory.
pub const INVENTORY_FILE: &str = "ansible_inventory.yml";
/// File name of the generated engine config inside the ephemeral directory.
pub const CONFIG_FILE: &str = "ansible.cfg";

/// Orchestrates the external provisioning engine for one scenario.
///
/// The ephemeral directory is owned and pre-created by the caller; this
/// type only writes the two generated files into it. Merged options and
/// the inventory are recomputed on every access so they always reflect
/// the current scenario configuration.
pub struct AnsibleProvisioner<R: CommandRunner, D: Driver> {
    config: ScenarioConfig,
    ephemeral_dir: PathBuf,
    driver: D,
    runner: R,
}

impl<R: CommandRunner, D: Driver> AnsibleProvisioner<R, D> {
    pub fn new(
        config: ScenarioConfig,
        ephemeral_dir: impl Into<PathBuf>,
        driver: D,
        runner: R,
    ) -> Self {
        Self {
            config,
            ephemeral_dir: ephemeral_dir.into(),
            driver,
            runner,
        }
    }

    /// Provisioner name from the scenario's `provisioner` section.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.provisioner.name
    }

    /// Engine config: built-in defaults with the scenario's
    /// `config_options` merged over them.
    #[must_use]
    pub fn config_options(&self) -> Mapping {
        merge_mappings(
            &default_config_options(&filter_plugins_directory()),
            &self.config.provisioner.config_options,
        )
    }

    /// CLI flags: built-in defaults with the scenario's `options` merged
    /// over them.
    #[must_use]
    pub fn options(&self) -> Mapping {
        merge_mappings(
            &default_options(self.config.debug),
            &self.config.provisioner.options,
        )
    }

    /// The grouped host inventory for the scenario's platforms.
    #[must_use]
    pub fn inventory(&self) -> Mapping {
        build_inventory(&self.config.platforms, |platform| {
            self.driver.connection_options(platform)
        })
    }

    /// Path of the generated inventory file.
    #[must_use]
    pub fn inventory_file(&self) -> PathBuf {
        self.ephemeral_dir.join(INVENTORY_FILE)
    }

    /// Path of the generated engine config file.
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.ephemeral_dir.join(CONFIG_FILE)
    }

    /// Write both generated files. Must complete once before any
    /// invocation; call again to refresh them after configuration edits.
    pub fn prepare(&self) -> Result<()> {
        self.write_inventory()?;
        self.write_config()
    }

    /// Serialize the inventory to YAML and write it, overwriting any
    /// existing file.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::domain::error::ScenarioError::MissingPlatforms`]
    /// before touching the filesystem when the inventory is empty;
    /// filesystem errors propagate unchanged with the path attached.
    pub fn write_inventory(&self) -> Result<()> {
        let inventory = self.inventory();
        verify_inventory(&inventory)?;

        let path = self.inventory_file();
        debug!(path = %path.display(), "writing inventory");
        let content = serde_yaml::to_string(&inventory).context("cannot serialize inventory")?;
        std::fs::write(&path, content).with_context(|| format!("cannot write {}", path.display()))
    }

    /// Render the merged engine config and write it, overwriting any
    /// existing file.
    pub fn write_config(&self) -> Result<()> {
        let path = self.config_file();
        debug!(path = %path.display(), "writing engine config");
        let content = render_config(&self.config_options())?;
        std::fs::write(&path, content).with_context(|| format!("cannot write {}", path.display()))
    }

    /// Run the playbook against the generated inventory and return the
    /// engine's captured stdout. `extra_args` are appended after the
    /// merged CLI flags and win on collision.
    pub async fn converge(&self, playbook: &Path, extra_args: &Mapping) -> Result<String> {
        let mut command = self.playbook_command(playbook);
        command.add_cli_args(extra_args);
        info!(playbook = %playbook.display(), "converging");
        command.execute().await
    }

    /// Run the engine's playbook syntax check. Exactly one invocation,
    /// flagged `--syntax-check` and nothing else.
    pub async fn syntax(&self, playbook: &Path) -> Result<()> {
        let mut command = self.playbook_command(playbook);
        command.add_cli_arg("syntax-check", true);
        command.execute().await.map(drop)
    }

    /// Run the playbook in the engine's dry-run mode (`--check`).
    pub async fn check(&self, playbook: &Path) -> Result<()> {
        let mut command = self.playbook_command(playbook);
        command.add_cli_arg("check", true);
        command.execute().await.map(drop)
    }

    /// A playbook command carrying the shared execution context: the
    /// inventory file, the merged CLI flags, and `ANSIBLE_CONFIG` pointing
    /// at the generated config.
    fn playbook_command(&self, playbook: &Path) -> PlaybookCommand<'_, R> {
        let mut command = PlaybookCommand::new(&self.runner, self.inventory_file(), playbook);
        command.add_cli_args(&self.options());
        command.add_env_arg("ANSIBLE_CONFIG", &self.config_file().to_string_lossy());
        command
    }
}
