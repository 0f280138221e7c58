//! Injected system-settings capability
//!
//! The maintenance screen is shown only while the operator keeps the
//! maintenance flag up. The flag lives outside this process, so the screen
//! takes the check as an injected capability and can be tested without any
//! real backing store.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The slice of system settings the maintenance screen cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSettings {
    pub maintenance_mode_enabled: bool,
}

/// Abstract settings fetch, polled on a fixed interval by the screen
pub trait SettingsProvider {
    fn fetch_system_settings(&self) -> Result<SystemSettings>;
}

/// Reads settings from a JSON file on every fetch.
///
/// The file is re-read each poll so an operator can flip the flag while the
/// screen is running.
pub struct FileSettingsProvider {
    path: PathBuf,
}

impl FileSettingsProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SettingsProvider for FileSettingsProvider {
    fn fetch_system_settings(&self) -> Result<SystemSettings> {
        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read system settings from {:?}", self.path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse system settings in {:?}", self.path))
    }
}

/// Provider with a fixed answer, for runs without a settings file and for
/// tests
pub struct StaticSettingsProvider {
    settings: SystemSettings,
}

impl StaticSettingsProvider {
    pub fn new(settings: SystemSettings) -> Self {
        Self { settings }
    }

    /// Maintenance never ends on its own
    pub fn maintenance_on() -> Self {
        Self::new(SystemSettings {
            maintenance_mode_enabled: true,
        })
    }
}

impl SettingsProvider for StaticSettingsProvider {
    fn fetch_system_settings(&self) -> Result<SystemSettings> {
        Ok(self.settings)
    }
}
