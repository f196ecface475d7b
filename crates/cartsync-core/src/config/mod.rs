//! Workspace configuration, loaded from TOML. Every section falls back to
//! the values in [`defaults`].

pub mod defaults;
mod observability_config;
mod reconcile_config;
mod remote_config;

pub use observability_config::ObservabilityConfig;
pub use reconcile_config::ReconcileConfig;
pub use remote_config::RemoteConfig;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CartError, CartResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CartSyncConfig {
    pub remote: RemoteConfig,
    pub reconcile: ReconcileConfig,
    pub observability: ObservabilityConfig,
}

impl CartSyncConfig {
    pub fn from_toml(s: &str) -> CartResult<Self> {
        let config: Self =
            toml::from_str(s).map_err(|e| CartError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> CartResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CartError::ConfigError(format!("read {}: {e}", path.display())))?;
        Self::from_toml(&raw)
    }

    fn validate(&self) -> CartResult<()> {
        if self.reconcile.fetch_concurrency == 0 {
            return Err(CartError::ConfigError(
                "reconcile.fetch_concurrency must be at least 1".to_string(),
            ));
        }
        if self.reconcile.fetch_timeout_ms == Some(0) {
            return Err(CartError::ConfigError(
                "reconcile.fetch_timeout_ms must be positive when set".to_string(),
            ));
        }
        for (name, value) in [
            ("enumerate_clones", &self.remote.enumerate_clones),
            ("read_all_carts", &self.remote.read_all_carts),
            ("clone_cell", &self.remote.clone_cell),
            ("create_cart_entry", &self.remote.create_cart_entry),
        ] {
            if value.trim().is_empty() {
                return Err(CartError::ConfigError(format!(
                    "remote.{name} cannot be empty"
                )));
            }
        }
        Ok(())
    }
}
