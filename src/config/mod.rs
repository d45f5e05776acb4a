//! # Provisioning Configuration
//!
//! Layered configuration for the provisioning orchestrator.
//!
//! ## Sources (later wins)
//!
//! - Built-in defaults
//! - `config/provisioning.toml`
//! - `config/provisioning.<environment>.toml`
//! - `PROVISIONING__*` environment variables (e.g. `PROVISIONING__REGION`)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use scheduler_provisioning::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let region = &manager.config().region;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use crate::constants::DEFAULT_REGION;
use serde::{Deserialize, Serialize};

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

/// Root configuration for the provisioning orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProvisioningConfig {
    /// Region the scheduler's Cloud Function is deployed to
    pub region: String,

    /// Fetch a snapshot as soon as the orchestrator is started
    pub refresh_on_start: bool,

    /// Capacity of the provisioning event broadcast channel
    pub event_buffer_size: usize,
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            refresh_on_start: true,
            event_buffer_size: 256,
        }
    }
}

impl ProvisioningConfig {
    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.region.trim().is_empty() {
            return Err(ConfigurationError::invalid_value(
                "region",
                self.region.clone(),
                "region must not be empty",
            ));
        }

        if self.event_buffer_size == 0 {
            return Err(ConfigurationError::invalid_value(
                "event_buffer_size",
                "0",
                "event buffer must hold at least one event",
            ));
        }

        Ok(())
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }
}
