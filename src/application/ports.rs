//! Port trait definitions.
//!
//! Ports are the contracts that infrastructure must fulfill. This file
//! imports only from `crate::domain` — never from `crate::infra`.

use std::process::Output;
use std::time::Duration;

use anyhow::Result;
use serde_yaml::Mapping;

use crate::domain::config::Platform;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
///
/// The runner fully owns the spawned process handle. Calls block (await)
/// until the subprocess exits; no retry logic lives behind this seam.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program with the given arguments and extra environment
    /// variables, capturing its output.
    async fn run(&self, program: &str, args: &[String], env: &[(String, String)])
    -> Result<Output>;

    /// Run a program with a timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds
    /// `timeout`. On timeout the child must be killed, not left orphaned.
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[String],
        env: &[(String, String)],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Driver Port ───────────────────────────────────────────────────────────────

/// Abstracts the virtualization backend's connection parameters.
///
/// Drivers themselves live outside this crate; the provisioner only asks
/// how the engine should reach each provisioned instance.
pub trait Driver {
    /// Driver name, e.g. `docker`.
    fn name(&self) -> &str;

    /// Connection options for one platform, e.g.
    /// `{ansible_connection: docker}`. Inserted verbatim under the
    /// platform's host key in the inventory.
    fn connection_options(&self, platform: &Platform) -> Mapping;
}

impl<T: Driver + ?Sized> Driver for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn connection_options(&self, platform: &Platform) -> Mapping {
        (**self).connection_options(platform)
    }
}
