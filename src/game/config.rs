use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for a play session.
///
/// Every field may be left out of a config file, in which case the default
/// is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Milliseconds of game time per engine step
    ///
    /// Default: 125
    pub step_interval_ms: u64,

    /// Milliseconds between redraws
    ///
    /// Default: 33
    pub frame_interval_ms: u64,

    /// Seed for food placement; random when absent
    pub seed: Option<u64>,

    /// File receiving log output; logging is off when absent
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            step_interval_ms: 125,
            frame_interval_ms: 33,
            seed: None,
            log_file: None,
        }
    }
}

impl GameConfig {
    /// Parse a YAML document and validate it
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self =
            serde_yaml_ng::from_str(content).context("Failed to parse game config")?;
        config
            .validate()
            .map_err(|e| anyhow!("Invalid game config: {}", e))?;
        Ok(config)
    }

    /// Load and validate a YAML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_yaml_str(&content).with_context(|| format!("In config file {:?}", path))
    }

    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Validate configuration parameters
    ///
    /// # Returns
    ///
    /// `Ok(())` if all parameters are valid, `Err(String)` with an error message otherwise.
    pub fn validate(&self) -> Result<(), String> {
        if self.step_interval_ms == 0 {
            return Err("step_interval_ms must be at least 1".to_string());
        }

        if self.frame_interval_ms == 0 {
            return Err("frame_interval_ms must be at least 1".to_string());
        }

        if self.frame_interval_ms > 1000 {
            return Err(format!(
                "frame_interval_ms must be at most 1000, got {}",
                self.frame_interval_ms
            ));
        }

        Ok(())
    }
}
