//! Configuration module
//!
//! TOML file (~/.config/meteringpoint-service/config.toml) with logging and
//! per-process effective-date policy windows.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::policies::EffectiveDatePolicy;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub policies: PoliciesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Allowed effective-date window per business process. Thresholds differ per
/// process, so each carries its own pair instead of sharing one constant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoliciesConfig {
    pub create: EffectiveDateWindow,
    pub connect: EffectiveDateWindow,
    pub disconnect: EffectiveDateWindow,
    pub reconnect: EffectiveDateWindow,
    pub update: EffectiveDateWindow,
    pub close_down: EffectiveDateWindow,
}

impl Default for PoliciesConfig {
    fn default() -> Self {
        Self {
            create: EffectiveDateWindow::new(30, 1),
            connect: EffectiveDateWindow::new(2, 1),
            disconnect: EffectiveDateWindow::new(2, 1),
            reconnect: EffectiveDateWindow::new(2, 1),
            update: EffectiveDateWindow::new(5, 1),
            close_down: EffectiveDateWindow::new(5, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectiveDateWindow {
    pub max_days_in_past: i64,
    pub max_days_in_future: i64,
}

impl EffectiveDateWindow {
    pub fn new(max_days_in_past: i64, max_days_in_future: i64) -> Self {
        Self {
            max_days_in_past,
            max_days_in_future,
        }
    }

    pub fn policy(&self) -> EffectiveDatePolicy {
        EffectiveDatePolicy::new(self.max_days_in_past, self.max_days_in_future)
    }
}

impl Default for EffectiveDateWindow {
    fn default() -> Self {
        Self::new(2, 1)
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }
}

pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("meteringpoint-service")
        .join("config.toml")
}

// ── Tests ──────────────────────────────────────────────────────
