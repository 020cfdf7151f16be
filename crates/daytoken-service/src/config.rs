//! Service configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Credential cycle length in seconds
    pub cycle_secs: f64,

    /// Countdown tick cadence in milliseconds
    pub tick_interval_ms: u64,

    /// Number of decimal digits per token
    pub token_width: usize,

    /// Optional JSON file holding the status history feed
    pub history_path: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            cycle_secs: daytoken_core::DEFAULT_CYCLE_SECS,
            // 50 ms keeps the countdown ring smooth
            tick_interval_ms: 50,
            token_width: daytoken_core::TOKEN_WIDTH,
            history_path: None,
        }
    }
}

impl ServiceConfig {
    /// Platform-appropriate default config location
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("daytoken")
            .join("service.json")
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Engine parameters derived from this config
    pub fn engine_config(&self) -> daytoken_core::EngineConfig {
        daytoken_core::EngineConfig {
            cycle_secs: self.cycle_secs,
            token_width: self.token_width,
        }
    }

    /// Tick cadence as a [`std::time::Duration`]
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms)
    }
}
