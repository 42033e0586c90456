//! Reference `Driver` implementations.
//!
//! Real virtualization backends live outside this crate; these cover the
//! common container case and scenario-configured connection options.

use serde_yaml::{Mapping, Value};

use crate::application::ports::Driver;
use crate::domain::config::{DriverSettings, Platform};

/// Connects the engine to instances over the docker connection plugin.
pub struct DockerDriver;

impl Driver for DockerDriver {
    fn name(&self) -> &str {
        "docker"
    }

    fn connection_options(&self, _platform: &Platform) -> Mapping {
        let mut options = Mapping::new();
        options.insert(Value::from("ansible_connection"), Value::from("docker"));
        options
    }
}

/// Hands out a fixed connection-options mapping, verbatim, for every
/// platform. Backs scenario files that configure their own backend.
pub struct StaticDriver {
    name: String,
    options: Mapping,
}

impl StaticDriver {
    #[must_use]
    pub fn new(name: impl Into<String>, options: Mapping) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }
}

impl Driver for StaticDriver {
    fn name(&self) -> &str {
        &self.name
    }

    fn connection_options(&self, _platform: &Platform) -> Mapping {
        self.options.clone()
    }
}

/// Pick a driver for the scenario's `driver` section. Unknown names fall
/// back to the section's own `connection_options`, passed through as-is.
#[must_use]
pub fn from_settings(settings: &DriverSettings) -> Box<dyn Driver> {
    match settings.name.as_str() {
        "docker" => Box::new(DockerDriver),
        _ => Box::new(StaticDriver::new(
            settings.name.clone(),
            settings.connection_options.clone(),
        )),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
