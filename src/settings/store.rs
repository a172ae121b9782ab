//! Settings persistence.
//!
//! This module provides a trait-based abstraction over the settings store so
//! the sync flows can be tested without touching the user's config file.

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;

use super::{SettingsError, SyncSettings};

/// Trait for reading and writing settings. Can be mocked in tests.
#[cfg_attr(test, automock)]
pub trait SettingsStore {
    /// Load the current settings.
    fn load(&self) -> Result<SyncSettings, SettingsError>;

    /// Replace the stored settings.
    fn save(&self, settings: &SyncSettings) -> Result<(), SettingsError>;

    /// Persist a new vault root, keeping every other value.
    fn set_vault_root(&self, path: &Path) -> Result<(), SettingsError>;
}

/// Settings stored as a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self) -> Result<SyncSettings, SettingsError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SyncSettings::default());
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if contents.trim().is_empty() {
            return Ok(SyncSettings::default());
        }

        serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, settings: &SyncSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        let mut json = serde_json::to_string_pretty(settings)?;
        json.push('\n');

        fs::write(&self.path, json).map_err(|source| SettingsError::Write {
            path: self.path.clone(),
            source,
        })
    }

    fn set_vault_root(&self, path: &Path) -> Result<(), SettingsError> {
        let mut settings = self.load()?;
        settings.vault_root = Some(path.to_path_buf());
        self.save(&settings)
    }
}
