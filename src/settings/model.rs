//! Settings values and the keys used to address them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::SettingsError;

/// Default folder under the vault root for generated notes.
pub const DEFAULT_SUBFOLDER: &str = "Code";

/// Settings read fresh for every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSettings {
    /// Root of the notes vault.
    #[serde(
        rename = "obsidianPath",
        default,
        deserialize_with = "crate::serde_utils::empty_path_as_none",
        serialize_with = "crate::serde_utils::path_or_empty"
    )]
    pub vault_root: Option<PathBuf>,

    /// Folder under the vault root; empty means the root itself.
    #[serde(default = "default_subfolder")]
    pub subfolder: String,

    /// Sync files automatically when they are saved.
    #[serde(default)]
    pub auto_sync: bool,

    /// Add a `Last synced` line to each note.
    #[serde(default)]
    pub add_timestamp: bool,
}

fn default_subfolder() -> String {
    DEFAULT_SUBFOLDER.to_string()
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            vault_root: None,
            subfolder: default_subfolder(),
            auto_sync: false,
            add_timestamp: false,
        }
    }
}

impl SyncSettings {
    /// The configured vault root, only if it is an existing directory.
    pub fn existing_vault_root(&self) -> Option<&PathBuf> {
        self.vault_root.as_ref().filter(|root| root.is_dir())
    }

    /// Current value of a key, rendered the way `config get` prints it.
    pub fn get(&self, key: SettingKey) -> String {
        match key {
            SettingKey::ObsidianPath => self
                .vault_root
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default(),
            SettingKey::Subfolder => self.subfolder.clone(),
            SettingKey::AutoSync => self.auto_sync.to_string(),
            SettingKey::AddTimestamp => self.add_timestamp.to_string(),
        }
    }

    /// Parse and assign a value for a key.
    pub fn set(&mut self, key: SettingKey, value: &str) -> Result<(), SettingsError> {
        match key {
            SettingKey::ObsidianPath => {
                let trimmed = value.trim();
                self.vault_root = (!trimmed.is_empty()).then(|| PathBuf::from(trimmed));
            }
            SettingKey::Subfolder => self.subfolder = value.trim().to_string(),
            SettingKey::AutoSync => self.auto_sync = parse_bool(key, value)?,
            SettingKey::AddTimestamp => self.add_timestamp = parse_bool(key, value)?,
        }
        Ok(())
    }
}

fn parse_bool(key: SettingKey, value: &str) -> Result<bool, SettingsError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(SettingsError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            expected: "true or false",
        }),
    }
}

/// Addressable settings keys, spelled as in the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    ObsidianPath,
    Subfolder,
    AutoSync,
    AddTimestamp,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::ObsidianPath,
        SettingKey::Subfolder,
        SettingKey::AutoSync,
        SettingKey::AddTimestamp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::ObsidianPath => "obsidianPath",
            SettingKey::Subfolder => "subfolder",
            SettingKey::AutoSync => "autoSync",
            SettingKey::AddTimestamp => "addTimestamp",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| SettingsError::UnknownKey { key: s.to_string() })
    }
}
